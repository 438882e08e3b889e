//! # Portal Configuration
//!
//! Configuration is read from environment variables and validated up front so a
//! bad backend URL fails at startup instead of on the first request.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PORTAL_BACKEND_URL` | required | Backend origin, e.g. `http://127.0.0.1:8000` |
//! | `PORTAL_REQUEST_TIMEOUT_SECS` | `30` | Default per-call timeout (1-300) |
//! | `PORTAL_RENEWAL_PATH` | `/refresh/` | Session renewal endpoint |
//! | `PORTAL_STORAGE_FILE` | unset | Persist the session store to this JSON file |
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use portal::config::{init_config, portal_config};
//!
//! init_config()?;
//! let config = portal_config()?;
//! println!("backend: {}", config.backend_url);
//! # Ok::<(), portal::core::ApiError>(())
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::envs::{get_env, get_env_opt, get_env_or, get_env_parse};
use reqwest::Url;

use crate::core::error::{ApiError, Result};

pub const DEFAULT_RENEWAL_PATH: &str = "/refresh/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PortalConfig {
    /// Backend origin without a trailing slash.
    pub backend_url: String,

    /// Path of the session renewal endpoint, relative to `backend_url`.
    pub renewal_path: String,

    /// Applied to calls that do not set their own timeout. `None` waits forever.
    pub request_timeout: Option<Duration>,

    /// When set, the session store survives restarts in this file.
    pub storage_file: Option<PathBuf>,
}

impl PortalConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim().trim_end_matches('/').to_string(),
            renewal_path: DEFAULT_RENEWAL_PATH.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            storage_file: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_renewal_path(mut self, path: impl Into<String>) -> Self {
        self.renewal_path = path.into();
        self
    }

    pub fn with_storage_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_file = Some(path.into());
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let backend_url =
            get_env("PORTAL_BACKEND_URL").map_err(|e| ApiError::Config(e.to_string()))?;

        let timeout_secs = match get_env_opt("PORTAL_REQUEST_TIMEOUT_SECS") {
            Some(_) => get_env_parse::<u64>("PORTAL_REQUEST_TIMEOUT_SECS")
                .map_err(|e| ApiError::Config(e.to_string()))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(backend_url)
            .with_request_timeout(Some(Duration::from_secs(timeout_secs)))
            .with_renewal_path(get_env_or("PORTAL_RENEWAL_PATH", DEFAULT_RENEWAL_PATH));
        config.storage_file = get_env_opt("PORTAL_STORAGE_FILE").map(PathBuf::from);

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend_url).map_err(|e| {
            ApiError::Config(format!("backend URL {:?} is invalid: {}", self.backend_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "backend URL must use http or https, got {}",
                url.scheme()
            )));
        }

        if url.host_str().is_none() {
            return Err(ApiError::Config("backend URL has no host".to_string()));
        }

        if self.renewal_path.trim().is_empty() {
            return Err(ApiError::Config("renewal path cannot be empty".to_string()));
        }

        if let Some(timeout) = self.request_timeout {
            if timeout.is_zero() || timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
                return Err(ApiError::Config(format!(
                    "request timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"
                )));
            }
        }

        Ok(())
    }
}

static CONFIG: OnceLock<PortalConfig> = OnceLock::new();

/// Load, validate and install the process-wide configuration.
///
/// Call once at startup. A second call fails.
pub fn init_config() -> Result<()> {
    let config = PortalConfig::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ApiError::Config("config has already been initialized".to_string()))
}

/// The configuration installed by [`init_config`].
pub fn portal_config() -> Result<&'static PortalConfig> {
    CONFIG
        .get()
        .ok_or_else(|| ApiError::Config("config must be initialized with init_config() before use".to_string()))
}
