//! # API Client
//!
//! [`ApiClient::fetch_with_auth`] performs one logical backend call:
//!
//! 1. Builds the request against the configured origin with `Content-Type:
//!    application/json` under any caller headers; session cookies ride along
//!    from the [`CredentialJar`].
//! 2. `204` returns `Ok(None)` without touching the body.
//! 3. `401` on a call that may retry triggers exactly one
//!    [`ApiClient::renew_session`]; on success the identical request is sent
//!    once more with retry disabled.
//! 4. Any other non-success status (including a 401 that could not be
//!    recovered) becomes [`ApiError::Request`] with a message taken from the
//!    body's `detail`, else the serialized body, else the status.
//! 5. Success parses the JSON body.
//!
//! No response at all becomes [`ApiError::Network`] naming the origin.
//!
//! The whole sequence, renewal and retry included, runs under the caller's
//! timeout and cancellation token.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::ErrorResponse;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::credentials::CredentialJar;
use crate::config::{portal_config, PortalConfig};
use crate::core::error::{ApiError, Result};
use crate::core::service::ApiService;

/// Per-call options.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Merged over the default `Content-Type: application/json`.
    pub headers: HeaderMap,
    /// Allow one renewal-and-retry on `401`. Defaults to `true`.
    pub retry: bool,
    /// Overrides the client's default timeout for this call.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
            retry: true,
            timeout: None,
            cancel: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    /// `POST` with `body` serialized as JSON.
    pub fn post<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn without_retry(mut self) -> Self {
        self.retry = false;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Renewal bookkeeping for one logical call.
///
/// ```text
/// NotAttempted --401--> Renewing --ok--> Retried
///                                 \--fail--> Exhausted
/// Disabled (retry=false) never renews.
/// ```
///
/// Only `NotAttempted` can start a renewal, so a call renews at most once and
/// is re-sent at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Disabled,
    NotAttempted,
    Renewing,
    Retried,
    Exhausted,
}

impl RetryState {
    pub fn new(retry_allowed: bool) -> Self {
        if retry_allowed {
            RetryState::NotAttempted
        } else {
            RetryState::Disabled
        }
    }

    /// On a `401`: returns `true` if a renewal should run now.
    pub fn begin_renewal(&mut self) -> bool {
        if *self == RetryState::NotAttempted {
            *self = RetryState::Renewing;
            true
        } else {
            false
        }
    }

    /// Record the renewal outcome. Returns `true` if the request should be re-sent.
    pub fn finish_renewal(&mut self, renewed: bool) -> bool {
        debug_assert_eq!(*self, RetryState::Renewing);
        *self = if renewed {
            RetryState::Retried
        } else {
            RetryState::Exhausted
        };
        renewed
    }

    /// Whether the request currently being sent is the post-renewal retry.
    pub fn is_retry(&self) -> bool {
        *self == RetryState::Retried
    }
}

/// HTTP client for the exchange backend.
///
/// Cloning is cheap and clones share the connection pool and credentials.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: Client,
    origin: String,
    renewal_path: String,
    default_timeout: Option<Duration>,
    credentials: Arc<CredentialJar>,
}

impl ApiClient {
    /// Create a client for `config.backend_url` with an empty credential jar.
    pub fn new(config: &PortalConfig) -> Result<Self> {
        config.validate()?;

        let credentials = Arc::new(CredentialJar::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&credentials))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            origin: config.backend_url.clone(),
            renewal_path: normalize_path(&config.renewal_path),
            default_timeout: config.request_timeout,
            credentials,
        })
    }

    /// Client for the process-wide configuration (see [`crate::config::init_config`]).
    pub fn from_global_config() -> Result<Self> {
        Self::new(portal_config()?)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn credentials(&self) -> &CredentialJar {
        &self.credentials
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, normalize_path(path))
    }

    /// Perform one logical call. `Ok(None)` means `204 No Content`.
    #[tracing::instrument(
        name = "api_request",
        skip(self, options),
        fields(
            method = %options.method,
            request_id = %Uuid::new_v4(),
            retry = options.retry,
        )
    )]
    pub async fn fetch_with_auth(&self, path: &str, options: RequestOptions) -> Result<Option<Value>> {
        let start = Instant::now();
        let timeout = options.timeout.or(self.default_timeout);

        let call = async {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, self.run(path, &options))
                    .await
                    .map_err(|_| ApiError::Timeout {
                        origin: self.origin.clone(),
                        after: limit,
                    })?,
                None => self.run(path, &options).await,
            }
        };

        let result = match &options.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(ApiError::Cancelled),
                    result = call => result,
                }
            }
            None => call.await,
        };

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(_) => tracing::debug!(duration_ms, "Request completed"),
            Err(e) => tracing::warn!(error = %e, duration_ms, "Request failed"),
        }
        result
    }

    /// Typed variant of [`ApiClient::fetch_with_auth`]. A `204` is decoded from
    /// JSON `null`, which suits `()` and `Option<_>` targets.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let body = self
            .fetch_with_auth(path, options)
            .await?
            .unwrap_or(Value::Null);
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(path, RequestOptions::get()).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(path, RequestOptions::post(body)?).await
    }

    /// Ask the backend for a fresh access credential.
    ///
    /// Never fails: any error is logged and reported as `false`.
    #[tracing::instrument(skip(self))]
    pub async fn renew_session(&self) -> bool {
        let url = self.url(&self.renewal_path);
        let result = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Session renewed");
                true
            }
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "Session renewal rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session renewal failed");
                false
            }
        }
    }

    /// Drop all session credentials.
    pub fn clear_credentials(&self) {
        self.credentials.clear();
    }

    async fn run(&self, path: &str, options: &RequestOptions) -> Result<Option<Value>> {
        let url = self.url(path);
        let mut state = RetryState::new(options.retry);

        loop {
            let response = self.dispatch(&url, options).await?;
            let status = response.status();

            if status == StatusCode::NO_CONTENT {
                tracing::debug!("No content");
                return Ok(None);
            }

            if status == StatusCode::UNAUTHORIZED && state.begin_renewal() {
                tracing::debug!("Unauthorized, renewing session");
                let renewed = self.renew_session().await;
                if state.finish_renewal(renewed) {
                    tracing::debug!("Retrying once after renewal");
                    continue;
                }
            }

            if !status.is_success() {
                return Err(self.request_error(status, response).await);
            }

            return self.parse_body(response).await.map(Some);
        }
    }

    async fn dispatch(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers.clone());

        let mut request = self
            .http
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        request.send().await.map_err(|e| self.network_error(e))
    }

    async fn parse_body(&self, response: Response) -> Result<Value> {
        let bytes = response.bytes().await.map_err(|e| self.network_error(e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn request_error(&self, status: StatusCode, response: Response) -> ApiError {
        // Best effort: an unreadable or non-JSON body counts as empty.
        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes)
                .unwrap_or_else(|_| Value::Object(Default::default())),
            Err(_) => Value::Object(Default::default()),
        };

        ApiError::Request {
            status: status.as_u16(),
            message: error_message(&body, status),
        }
    }

    fn network_error(&self, err: reqwest::Error) -> ApiError {
        ApiError::Network {
            origin: self.origin.clone(),
            reason: err.to_string(),
        }
    }
}

/// Message priority: `detail`, then the serialized body, then the status.
pub(crate) fn error_message(body: &Value, status: StatusCode) -> String {
    if body.is_object() {
        if let Ok(ErrorResponse { detail: Some(detail) }) = ErrorResponse::deserialize(body) {
            if !detail.trim().is_empty() {
                return detail;
            }
        }
    }
    if let Some(detail) = body.get("detail").filter(|d| !d.is_null() && !d.is_string()) {
        let text = detail_text(detail);
        if !text.trim().is_empty() {
            return text;
        }
    }

    let is_empty = match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    };

    if is_empty {
        format!("Request failed with status {}", status.as_u16())
    } else {
        body.to_string()
    }
}

/// Lists of reasons read as `first,second`.
fn detail_text(detail: &Value) -> String {
    match detail {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(detail_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, request: shared::LoginRequest) -> Result<shared::LoginResponse> {
        super::auth::login(self, &request).await
    }

    async fn register(&self, request: shared::RegisterRequest) -> Result<shared::RegisterResponse> {
        super::auth::register(self, &request).await
    }

    async fn google_signup(&self, request: shared::GoogleSignupRequest) -> Result<shared::LoginResponse> {
        super::auth::google_signup(self, &request).await
    }

    async fn magic_login(&self, token: String) -> Result<shared::LoginResponse> {
        super::auth::magic_login(self, &token).await
    }

    async fn check_auth(&self) -> Result<shared::CheckAuthResponse> {
        super::auth::check_auth(self).await
    }

    async fn get_profile(&self) -> Result<shared::Profile> {
        super::profile::get_profile(self).await
    }

    async fn complete_profile(&self, request: shared::CompleteProfileRequest) -> Result<Value> {
        super::profile::complete_profile(self, &request).await
    }

    async fn update_avatar(&self, image_url: String) -> Result<Value> {
        super::profile::update_avatar(self, &image_url).await
    }

    async fn wallet_info(&self) -> Result<shared::WalletBalance> {
        super::wallet::wallet_info(self).await
    }

    async fn crypto_wallets(&self) -> Result<Vec<shared::WalletBalance>> {
        super::wallet::crypto_wallets(self).await
    }

    async fn exchange(&self, request: shared::ExchangeRequest) -> Result<shared::ExchangeResponse> {
        super::wallet::exchange(self, &request).await
    }

    async fn list_deposits(&self) -> Result<Vec<shared::DepositRequest>> {
        super::requests::list_deposits(self).await
    }

    async fn create_deposit(&self, request: shared::NewDepositRequest) -> Result<shared::DepositRequest> {
        super::requests::create_deposit(self, &request).await
    }

    async fn list_withdrawals(&self) -> Result<Vec<shared::WithdrawalRequest>> {
        super::requests::list_withdrawals(self).await
    }

    async fn create_withdrawal(
        &self,
        request: shared::NewWithdrawalRequest,
    ) -> Result<shared::WithdrawalRequest> {
        super::requests::create_withdrawal(self, &request).await
    }

    async fn initiate_payment(
        &self,
        provider: shared::PaymentProvider,
        amount: f64,
    ) -> Result<shared::PaymentSession> {
        super::payments::initiate_payment(self, provider, amount).await
    }

    fn clear_credentials(&self) {
        ApiClient::clear_credentials(self);
    }
}
