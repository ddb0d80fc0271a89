use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogLevel;

/// How the driver prints its reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format '{0}' (expected text or json)")]
pub struct UnknownOutputFormat(pub String);

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];
}

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Driver settings read from an optional JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DriverConfig {
    pub log_level: LogLevel,
    pub output: OutputFormat,
    /// Rewrite negative literals before rendering and evaluating
    pub normalize: bool,
    /// Evaluate batches on the rayon pool
    pub parallel: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            log_level: LogLevel::default(),
            output: OutputFormat::default(),
            normalize: false,
            parallel: true,
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub log_level: Option<LogLevel>,
    pub output: Option<OutputFormat>,
    pub normalize: bool,
    pub sequential: bool,
}

impl DriverConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: DriverConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// File values (or defaults when no file is given) with flags applied.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if overrides.normalize {
            self.normalize = true;
        }
        if overrides.sequential {
            self.parallel = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(!config.normalize);
        assert!(config.parallel);
    }

    #[test]
    fn test_parse_camel_case_with_missing_fields() {
        let config: DriverConfig =
            serde_json::from_str(r#"{"logLevel": "debug", "output": "json"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(!config.normalize);
        assert!(config.parallel);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = serde_json::from_str::<DriverConfig>(r#"{"log_level": "debug"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut config = DriverConfig {
            log_level: LogLevel::Error,
            output: OutputFormat::Json,
            normalize: false,
            parallel: true,
        };
        config.apply(&Overrides {
            log_level: Some(LogLevel::Info),
            output: None,
            normalize: true,
            sequential: true,
        });
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.normalize);
        assert!(!config.parallel);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("exprgrid-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"normalize": true, "parallel": false}"#).unwrap();
        let config = DriverConfig::resolve(Some(&path), &Overrides::default()).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(config.normalize);
        assert!(!config.parallel);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let path = Path::new("/nonexistent/exprgrid.json");
        let err = DriverConfig::load(path).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/exprgrid.json"));
    }

    #[test]
    fn test_output_format_names() {
        for name in OutputFormat::NAMES {
            assert_eq!(name.parse::<OutputFormat>().unwrap().to_string(), name);
        }
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
