//! Structured logging setup for flkr.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the binary (or an embedding application). Log output always goes
//! to stderr so that reports and generated manifests on stdout stay clean.
//!
//! # Example
//!
//! ```no_run
//! use flkr::util::logging;
//!
//! // FLKR_LOG_LEVEL=debug FLKR_LOG_JSON=true
//! logging::init_from_env();
//!
//! tracing::debug!(path = ".", "Detecting stack");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// How the subscriber is configured.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `flkr` events. `RUST_LOG` still applies on top.
    pub level: Level,

    /// JSON lines instead of human-readable output.
    pub use_json: bool,

    pub include_target: bool,

    pub include_location: bool,
}

impl Default for LoggingConfig {
    /// Warnings only, human-readable, with targets.
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Verbose output with source locations, for `-v` runs.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a level name case-insensitively, falling back to WARN.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("flkr={}", level).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);
        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        // A subscriber set elsewhere (e.g. by an embedding test harness) wins.
        let _ = if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        };
    });
}

/// Reads configuration from the environment:
///
/// - `FLKR_LOG_LEVEL` - trace, debug, info, warn (default) or error
/// - `FLKR_LOG_JSON` - `true` for JSON lines
/// - `RUST_LOG` - standard filtering, applied on top
pub fn init_from_env() {
    init_logging(config_from_env());
}

pub fn config_from_env() -> LoggingConfig {
    let level = env::var("FLKR_LOG_LEVEL")
        .map(|s| parse_level(&s))
        .unwrap_or(Level::WARN);
    let use_json = env::var("FLKR_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level,
        use_json,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
        assert_eq!(parse_level("INFO"), Level::INFO);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_invalid_defaults_to_warn() {
        assert_eq!(parse_level("loud"), Level::WARN);
        assert_eq!(parse_level(""), Level::WARN);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
        assert!(!config.include_location);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.include_location);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        env::set_var("FLKR_LOG_LEVEL", "debug");
        env::set_var("FLKR_LOG_JSON", "true");
        let config = config_from_env();
        env::remove_var("FLKR_LOG_LEVEL");
        env::remove_var("FLKR_LOG_JSON");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.use_json);
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        env::remove_var("FLKR_LOG_LEVEL");
        env::remove_var("FLKR_LOG_JSON");
        let config = config_from_env();

        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
    }
}
