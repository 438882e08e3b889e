//! Backend paths, relative to the configured origin.

pub const LOG_IN: &str = "/log-in/";
pub const REGISTER: &str = "/register/";
pub const GOOGLE_SIGNUP: &str = "/google-signup/";
pub const MAGIC_LOGIN: &str = "/magic-login/";
pub const CHECK_AUTH: &str = "/check_admin_auth/";

pub const COMPLETE_PROFILE: &str = "/complete-profile/";
pub const UPDATE_AVATAR: &str = "/update-avatar/";

pub const WALLET_INFO: &str = "/wallet-info/";
pub const CRYPTO_WALLETS: &str = "/crypto-wallets/";
pub const EXCHANGE: &str = "/exchange/";

/// Listing (GET) and creation (POST) share one path.
pub const DEPOSITS: &str = "/deposits/create/";
pub const WITHDRAWALS: &str = "/withdrawals/create/";
