//! # Authentication Endpoints
//!
//! Login, registration and session checks. A successful login leaves the
//! session cookies in the client's [`super::CredentialJar`]; nothing here
//! handles tokens directly.

use lib_utils::validation::{validate_email, validate_min_length, validate_not_empty};
use shared::{
    CheckAuthResponse, GoogleSignupRequest, LoginRequest, LoginResponse, MagicLoginRequest,
    RegisterRequest, RegisterResponse,
};

use super::client::ApiClient;
use super::endpoints;
use crate::core::error::{ApiError, Result};

/// Matches the backend's password policy.
const MIN_PASSWORD_LENGTH: usize = 8;

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    validate_email(email).map_err(ApiError::Validation)?;
    validate_not_empty(password, "Password").map_err(ApiError::Validation)
}

/// Login with email and password.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginResponse> {
    validate_credentials(&request.email, &request.password)?;
    tracing::info!("Attempting login");

    let response: LoginResponse = client.post(endpoints::LOG_IN, request).await?;
    tracing::info!(new_user = ?response.new_user, "Login successful");
    Ok(response)
}

/// Create an account. The backend follows up with a one-time code by email,
/// so no session is opened here.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<RegisterResponse> {
    validate_credentials(&request.email, &request.password)?;
    validate_min_length(&request.password, MIN_PASSWORD_LENGTH, "Password").map_err(ApiError::Validation)?;
    client.post(endpoints::REGISTER, request).await
}

/// Exchange an identity-provider credential for a session.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn google_signup(
    client: &ApiClient,
    request: &GoogleSignupRequest,
) -> Result<LoginResponse> {
    validate_not_empty(&request.token, "Token").map_err(ApiError::Validation)?;
    client.post(endpoints::GOOGLE_SIGNUP, request).await
}

/// Redeem a magic-link token.
#[tracing::instrument(skip(client, token))]
pub async fn magic_login(client: &ApiClient, token: &str) -> Result<LoginResponse> {
    validate_not_empty(token, "Token").map_err(ApiError::Validation)?;
    let request = MagicLoginRequest {
        token: token.trim().to_string(),
    };
    client.post(endpoints::MAGIC_LOGIN, &request).await
}

/// Ask the backend whether the current credentials still identify a user.
#[tracing::instrument(skip(client))]
pub async fn check_auth(client: &ApiClient) -> Result<CheckAuthResponse> {
    client.get(endpoints::CHECK_AUTH).await
}
