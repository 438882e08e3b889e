//! # Logging
//!
//! `tracing` subscriber setup for embedders of the portal core.
//!
//! - [`config`]: [`LogConfig`], read from environment variables
//! - [`logger`]: [`init`], installs the subscriber
//!
//! ```rust,no_run
//! let _guard = portal::logging::init(portal::logging::LogConfig::from_env());
//! tracing::info!("portal started");
//! ```
//!
//! Keep the returned guard alive for the lifetime of the process; dropping it
//! flushes and stops the background writer.

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
