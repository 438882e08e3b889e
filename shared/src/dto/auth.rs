use serde::{Deserialize, Serialize};

/// Login request (`POST /log-in/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request (`POST /register/`)
///
/// Registration does not open a session: the backend emails a one-time code first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Registration acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
}

/// Google identity-provider callback exchange (`POST /google-signup/`)
///
/// `token` is the raw ID token; the profile claims are decoded client-side and
/// forwarded so the backend can create the account on first sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleSignupRequest {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Magic-link login (`POST /magic-login/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MagicLoginRequest {
    pub token: String,
}

/// Public user record returned with a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Session creation response (login, Google sign-up, magic link).
///
/// The credential pair travels as cookies; any token fields the backend also
/// echoes in the body are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub new_user: Option<bool>,
}

/// Session check (`GET /check_admin_auth/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckAuthResponse {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}
