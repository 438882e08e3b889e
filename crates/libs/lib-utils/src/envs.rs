//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get a required environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an optional environment variable; unset and blank are both `None`.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Get and parse a required environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// `1`, `true`, `yes` and `on` (any case) are set; anything else, or unset, is not.
pub fn get_env_flag(name: &'static str) -> bool {
    get_env_opt(name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is shared.

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_MISSING"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_MISSING"))
        );
        assert_eq!(get_env_or("LIB_UTILS_TEST_MISSING", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_env() {
        env::set_var("LIB_UTILS_TEST_PARSE", " 42 ");
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_PARSE"), Ok(42));

        env::set_var("LIB_UTILS_TEST_PARSE_BAD", "forty");
        assert_eq!(
            get_env_parse::<u64>("LIB_UTILS_TEST_PARSE_BAD"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_PARSE_BAD"))
        );
    }

    #[test]
    fn test_flag_env() {
        env::set_var("LIB_UTILS_TEST_FLAG", "Yes");
        assert!(get_env_flag("LIB_UTILS_TEST_FLAG"));
        env::set_var("LIB_UTILS_TEST_FLAG_OFF", "0");
        assert!(!get_env_flag("LIB_UTILS_TEST_FLAG_OFF"));
        assert!(!get_env_flag("LIB_UTILS_TEST_FLAG_UNSET"));
    }

    #[test]
    fn test_blank_is_unset() {
        env::set_var("LIB_UTILS_TEST_BLANK", "   ");
        assert_eq!(get_env_opt("LIB_UTILS_TEST_BLANK"), None);
    }
}
