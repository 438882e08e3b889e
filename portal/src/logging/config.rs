//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{get_env_flag, get_env_or};

pub const LOG_FILE_PREFIX: &str = "portal.log";
const DEFAULT_FILTER: &str = "portal=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory for the daily-rotated log file
    pub log_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset (e.g. "portal=debug,info")
    pub log_level: String,
    /// Also write human-readable logs to stderr
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_FILTER.to_string(),
            stderr: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from `PORTAL_LOG_DIR`, `RUST_LOG` and `PORTAL_LOG_STDERR`.
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("PORTAL_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", DEFAULT_FILTER),
            stderr: get_env_flag("PORTAL_LOG_STDERR"),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_PREFIX)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.log_file(), PathBuf::from("logs/portal.log"));
        assert!(!config.is_debug_enabled());
        assert!(!config.stderr);
    }

    #[test]
    fn test_debug_detection() {
        let config = LogConfig {
            log_level: "portal=debug,warn".to_string(),
            ..LogConfig::default()
        };
        assert!(config.is_debug_enabled());
    }
}
