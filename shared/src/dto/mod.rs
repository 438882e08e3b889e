//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the backend over the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Session creation (login, register, Google sign-up, magic link) and session check
//! - [`profile`] - Profile fields and avatar URI
//! - [`wallet`] - Per-currency balances and the exchange call
//! - [`requests`] - Deposit and withdrawal request records
//! - [`payments`] - Coinbase / Stripe deposit initiation
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /deposits/create/
//! Content-Type: application/json
//!
//! { "bank_name": "SogeBank", "amount": 250.0, "message": null }
//! ```
//!
//! ```text
//! HTTP/1.1 201 Created
//! Content-Type: application/json
//!
//! {
//!   "id": 12,
//!   "bank_name": "SogeBank",
//!   "amount": 250.0,
//!   "message": null,
//!   "status": "PENDING",
//!   "created_at": "2025-03-01T10:00:00Z",
//!   "approved_at": null
//! }
//! ```

pub mod auth;
pub mod payments;
pub mod profile;
pub mod requests;
pub mod wallet;

pub use auth::*;
pub use payments::*;
pub use profile::*;
pub use requests::*;
pub use wallet::*;

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on a non-success status.
///
/// Django REST Framework puts the human-readable reason in `detail`; other
/// endpoints return arbitrary field-error maps, which callers serialize as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
}
