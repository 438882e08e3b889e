//! # Wallet Endpoints
//!
//! Fiat balance, crypto balances and currency exchange.

use lib_utils::validation::validate_positive_amount;
use shared::{ExchangeRequest, ExchangeResponse, WalletBalance};

use super::client::ApiClient;
use super::endpoints;
use crate::core::error::{ApiError, Result};

/// The fiat (USD) wallet.
#[tracing::instrument(skip(client))]
pub async fn wallet_info(client: &ApiClient) -> Result<WalletBalance> {
    client.get(endpoints::WALLET_INFO).await
}

/// One entry per crypto currency the account holds.
#[tracing::instrument(skip(client))]
pub async fn crypto_wallets(client: &ApiClient) -> Result<Vec<WalletBalance>> {
    let wallets: Vec<WalletBalance> = client.get(endpoints::CRYPTO_WALLETS).await?;
    tracing::debug!(count = wallets.len(), "Fetched crypto wallets");
    Ok(wallets)
}

pub(crate) fn validate_exchange(request: &ExchangeRequest) -> Result<()> {
    if request.from_currency == request.to_currency {
        return Err(ApiError::Validation(
            "Cannot exchange a currency for itself".to_string(),
        ));
    }
    validate_positive_amount(request.amount, "Amount").map_err(ApiError::Validation)
}

/// Convert `amount` of `from_currency` into `to_currency`.
#[tracing::instrument(
    skip(client, request),
    fields(from = %request.from_currency, to = %request.to_currency, amount = request.amount)
)]
pub async fn exchange(client: &ApiClient, request: &ExchangeRequest) -> Result<ExchangeResponse> {
    validate_exchange(request)?;
    let response: ExchangeResponse = client.post(endpoints::EXCHANGE, request).await?;
    tracing::info!("Exchange completed");
    Ok(response)
}
