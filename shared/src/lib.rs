//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the portal client and the exchange backend.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, registration, identity-provider and magic-link DTOs
//!   - **[`dto::profile`]**: Profile read/write and avatar update
//!   - **[`dto::wallet`]**: Wallet balances and currency exchange
//!   - **[`dto::requests`]**: Deposit and withdrawal request records
//!   - **[`dto::payments`]**: Payment-provider deposit initiation
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** in both Rust and JSON
//! - Optional request fields are sent as `null` when absent, matching what the backend
//!   serializers expect
//! - Enums use the exact spelling the backend stores (`PENDING`, `SogeBank`, `USDT`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::auth::LoginRequest;
//!
//! let request = LoginRequest {
//!     email: "ada@example.com".to_string(),
//!     password: "secret".to_string(),
//! };
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["email"], "ada@example.com");
//! ```

pub mod dto;

pub use dto::*;
