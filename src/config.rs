use std::env;
use std::path::PathBuf;

use crate::narrative::UnhandledPolicy;

/// Settings for the I/O layer around the report engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub output_dir: Option<PathBuf>,
    pub log_level: String,
    pub unhandled_policy: UnhandledPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            log_level: "info".to_string(),
            unhandled_policy: UnhandledPolicy::Reject,
        }
    }
}

impl ReportConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let output_dir = env::var("REPORTS_OUTPUT_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("REPORTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let unhandled_policy = match env::var("REPORTS_UNHANDLED_COMBINATION") {
            Ok(value) => UnhandledPolicy::parse(&value)
                .ok_or(ConfigError::InvalidPolicy { value })?,
            Err(_) => UnhandledPolicy::Reject,
        };

        Ok(Self {
            output_dir,
            log_level,
            unhandled_policy,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("REPORTS_UNHANDLED_COMBINATION must be 'reject' or 'omit', got '{value}'")]
    InvalidPolicy { value: String },
}
