//! # Service Traits
//!
//! [`ApiService`] lists every backend operation the views use. The production
//! implementation is [`crate::services::api::ApiClient`]; tests substitute a mock.

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    CheckAuthResponse, CompleteProfileRequest, DepositRequest, ExchangeRequest, ExchangeResponse,
    GoogleSignupRequest, LoginRequest, LoginResponse, NewDepositRequest, NewWithdrawalRequest,
    PaymentProvider, PaymentSession, Profile, RegisterRequest, RegisterResponse, WalletBalance,
    WithdrawalRequest,
};

use super::error::Result;

#[async_trait]
pub trait ApiService: Send + Sync {
    /// Open a session with email and password.
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse>;

    /// Create an account; a one-time code is emailed before the first login.
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse>;

    /// Exchange a Google ID token for a session.
    async fn google_signup(&self, request: GoogleSignupRequest) -> Result<LoginResponse>;

    /// Exchange a magic-link token for a session.
    async fn magic_login(&self, token: String) -> Result<LoginResponse>;

    /// Ask the backend whether the current credentials are still valid.
    async fn check_auth(&self) -> Result<CheckAuthResponse>;

    async fn get_profile(&self) -> Result<Profile>;

    async fn complete_profile(&self, request: CompleteProfileRequest) -> Result<Value>;

    /// Record an already-uploaded avatar URI.
    async fn update_avatar(&self, image_url: String) -> Result<Value>;

    /// Fiat (USD) wallet balance.
    async fn wallet_info(&self) -> Result<WalletBalance>;

    async fn crypto_wallets(&self) -> Result<Vec<WalletBalance>>;

    async fn exchange(&self, request: ExchangeRequest) -> Result<ExchangeResponse>;

    async fn list_deposits(&self) -> Result<Vec<DepositRequest>>;

    async fn create_deposit(&self, request: NewDepositRequest) -> Result<DepositRequest>;

    async fn list_withdrawals(&self) -> Result<Vec<WithdrawalRequest>>;

    async fn create_withdrawal(&self, request: NewWithdrawalRequest) -> Result<WithdrawalRequest>;

    /// Start a hosted checkout with a payment provider.
    async fn initiate_payment(&self, provider: PaymentProvider, amount: f64) -> Result<PaymentSession>;

    /// Forget every session credential held by the transport.
    fn clear_credentials(&self);
}
