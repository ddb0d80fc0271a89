// Console Logger
//
// `log` backend that writes to stderr.

use log::{Log, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;

use super::logger::LogLevel;

static LOGGER: OnceCell<ConsoleLogger> = OnceCell::new();

/// Console logger.
#[derive(Debug)]
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    pub fn format(record: &Record) -> String {
        format!("[{}] {}", record.level(), record.args())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Install the process-wide console logger. Later calls fail with
/// `SetLoggerError` and leave the installed logger in place.
pub fn init(level: LogLevel) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level));
    log::set_logger(logger)?;
    log::set_max_level(logger.level().to_level_filter());
    Ok(())
}
