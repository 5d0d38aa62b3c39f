use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TEMPLATES_URL: &str = "github:narvanalabs/flkr-templates";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_DETECT_TIMEOUT_SECS: u64 = 30;
const MAX_DETECT_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Runtime settings, read from `FLKR_*` environment variables and overridden
/// by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlkrConfig {
    /// Flake reference of the template repository.
    pub templates_url: String,
    /// Tag appended to `templates_url`; unset means the default branch.
    pub template_version: Option<String>,
    /// Detection deadline in seconds; 0 disables it.
    pub detect_timeout_secs: u64,
    pub log_level: String,
}

impl Default for FlkrConfig {
    fn default() -> Self {
        Self {
            templates_url: DEFAULT_TEMPLATES_URL.to_string(),
            template_version: None,
            detect_timeout_secs: DEFAULT_DETECT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl FlkrConfig {
    /// Reads `FLKR_TEMPLATES_URL`, `FLKR_TEMPLATE_VERSION`,
    /// `FLKR_DETECT_TIMEOUT` and `FLKR_LOG_LEVEL`, then validates.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let templates_url = non_empty_var("FLKR_TEMPLATES_URL").unwrap_or(defaults.templates_url);
        let template_version = non_empty_var("FLKR_TEMPLATE_VERSION");

        let detect_timeout_secs = match non_empty_var("FLKR_DETECT_TIMEOUT") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::ParseError {
                field: "FLKR_DETECT_TIMEOUT".to_string(),
                error: e.to_string(),
            })?,
            None => defaults.detect_timeout_secs,
        };

        let log_level = non_empty_var("FLKR_LOG_LEVEL")
            .map(|l| l.to_lowercase())
            .unwrap_or(defaults.log_level);

        let config = Self {
            templates_url,
            template_version,
            detect_timeout_secs,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.templates_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Templates URL cannot be empty".to_string(),
            ));
        }
        if self.templates_url.contains('"') {
            return Err(ConfigError::ValidationFailed(
                "Templates URL cannot contain quotes".to_string(),
            ));
        }
        if let Some(version) = &self.template_version {
            if version.contains('/') || version.contains('"') || version.contains(char::is_whitespace) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid template version: {}",
                    version
                )));
            }
        }
        if self.detect_timeout_secs > MAX_DETECT_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Detection timeout cannot exceed 1 hour".to_string(),
            ));
        }
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "warning" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }

    pub fn detect_timeout(&self) -> Option<Duration> {
        (self.detect_timeout_secs > 0).then(|| Duration::from_secs(self.detect_timeout_secs))
    }

    /// Applies command-line overrides and validates the result, so flag values
    /// pass the same checks as their environment counterparts.
    pub fn with_overrides(
        mut self,
        detect_timeout_secs: Option<u64>,
        template_version: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(timeout) = detect_timeout_secs {
            self.detect_timeout_secs = timeout;
        }
        if let Some(version) = template_version {
            self.template_version = Some(version);
        }
        self.validate()?;
        Ok(self)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
