//! # Services
//!
//! - [`api`]: HTTP access to the backend
//! - [`session`]: login state and profile attributes mirrored into the [`crate::state::SessionStore`]

pub mod api;
pub mod session;

pub use api::{ApiClient, CredentialJar, RequestOptions, RetryState};
pub use session::SessionService;
