// Logging
//
// Console backend for the `log` records emitted by the evaluator.

mod console_logger;
mod logger;


pub use console_logger::{init, ConsoleLogger};
pub use logger::{LogLevel, UnknownLogLevel};
