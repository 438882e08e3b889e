//! # Portal
//!
//! Client core for the exchange web portal: an authenticated HTTP client for
//! the backend and the shared session state that independently mounted views
//! read from.
//!
//! ## Module Structure
//!
//! ```text
//! portal/src/
//! ├── config.rs    - PortalConfig loaded from the environment
//! ├── core/        - ApiError and the ApiService seam
//! ├── logging/     - tracing subscriber bootstrap
//! ├── services/    - ApiClient, endpoint wrappers, SessionService
//! └── state/       - SessionStore, SyncedAttribute, account views
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portal::{ApiClient, PortalConfig, SessionService, SessionStore, SyncedAttribute};
//! use shared::LoginRequest;
//!
//! # async fn run() -> portal::Result<()> {
//! let config = PortalConfig::from_env()?;
//! let api = Arc::new(ApiClient::new(&config)?);
//! let session = SessionService::new(api, SessionStore::open(&config)?);
//!
//! let name = SyncedAttribute::display_name(session.store());
//! session
//!     .login(LoginRequest {
//!         email: "ada@example.com".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await?;
//! session.load_profile().await?;
//! println!("Hello, {}", name.get().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod services;
pub mod state;

pub use config::PortalConfig;
pub use crate::core::{ApiError, ApiService, Result};
pub use services::{ApiClient, RequestOptions, RetryState, SessionService};
pub use state::{SessionStore, SyncedAttribute};
