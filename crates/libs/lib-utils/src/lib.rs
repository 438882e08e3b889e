//! # Utilities Library
//!
//! Environment-variable readers and input validation shared by the portal crates.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_flag, get_env_opt, get_env_or, get_env_parse};
pub use validation::{
    validate_email, validate_min_length, validate_not_empty, validate_positive_amount,
};
