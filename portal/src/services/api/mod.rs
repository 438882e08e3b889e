//! # Backend API Client Module
//!
//! HTTP client for the exchange backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports
//! ├── client.rs       - ApiClient: credentials, renewal-and-retry, error normalization
//! ├── credentials.rs  - CredentialJar: the ambient session cookie store
//! ├── endpoints.rs    - Backend paths
//! ├── auth.rs         - Login, register, Google sign-up, magic link, session check
//! ├── profile.rs      - Profile read/write, avatar
//! ├── wallet.rs       - Balances and currency exchange
//! ├── requests.rs     - Deposit and withdrawal requests
//! └── payments.rs     - Coinbase / Stripe deposit initiation
//! ```

pub mod auth;
pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod payments;
pub mod profile;
pub mod requests;
pub mod wallet;

pub use client::{ApiClient, RequestOptions, RetryState};
pub use credentials::CredentialJar;
