//! # Core Abstractions
//!
//! Error type and service trait shared by the request client and the views.
//!
//! - **[`error`]**: [`ApiError`] and the crate-wide [`Result`] alias
//! - **[`service`]**: [`ApiService`], the backend operations views depend on
//!
//! Views hold an `Arc<dyn ApiService>` so they can run against the real
//! [`crate::services::api::ApiClient`] or a test double:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portal::config::PortalConfig;
//! use portal::core::ApiService;
//! use portal::services::api::ApiClient;
//!
//! let client = ApiClient::new(&PortalConfig::new("http://127.0.0.1:8000"))?;
//! let api: Arc<dyn ApiService> = Arc::new(client);
//! # Ok::<(), portal::core::ApiError>(())
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, Result};
pub use service::ApiService;
