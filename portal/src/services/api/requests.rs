//! # Deposit and Withdrawal Requests
//!
//! Listing and creation share one backend path per kind: `GET` lists the
//! caller's requests, `POST` files a new one. Created requests start out
//! `PENDING` and are resolved by staff on the backend.

use lib_utils::validation::{validate_not_empty, validate_positive_amount};
use shared::{
    CryptoTransferType, DepositRequest, NewDepositRequest, NewWithdrawalRequest, WithdrawalOption,
    WithdrawalRequest,
};

use super::client::ApiClient;
use super::endpoints;
use crate::core::error::{ApiError, Result};

#[tracing::instrument(skip(client))]
pub async fn list_deposits(client: &ApiClient) -> Result<Vec<DepositRequest>> {
    client.get(endpoints::DEPOSITS).await
}

#[tracing::instrument(skip(client, request), fields(amount = request.amount))]
pub async fn create_deposit(client: &ApiClient, request: &NewDepositRequest) -> Result<DepositRequest> {
    validate_positive_amount(request.amount, "Amount").map_err(ApiError::Validation)?;
    let created: DepositRequest = client.post(endpoints::DEPOSITS, request).await?;
    tracing::info!(id = created.id, "Deposit request created");
    Ok(created)
}

#[tracing::instrument(skip(client))]
pub async fn list_withdrawals(client: &ApiClient) -> Result<Vec<WithdrawalRequest>> {
    client.get(endpoints::WITHDRAWALS).await
}

pub(crate) fn validate_withdrawal(request: &NewWithdrawalRequest) -> Result<()> {
    validate_positive_amount(request.amount, "Amount").map_err(ApiError::Validation)?;

    match (request.crypto_type, request.option) {
        (Some(CryptoTransferType::External), _) => validate_not_empty(
            request.wallet_address.as_deref().unwrap_or_default(),
            "Wallet address",
        ),
        (Some(CryptoTransferType::Internal), _) => validate_not_empty(
            request.account_identifier.as_deref().unwrap_or_default(),
            "Account identifier",
        ),
        (None, Some(WithdrawalOption::SogeBank | WithdrawalOption::OtherBank)) => validate_not_empty(
            request.account_number.as_deref().unwrap_or_default(),
            "Account number",
        ),
        (None, Some(WithdrawalOption::Cash)) => Ok(()),
        (None, None) => Err("Choose a withdrawal method".to_string()),
    }
    .map_err(ApiError::Validation)
}

#[tracing::instrument(
    skip(client, request),
    fields(currency = %request.currency, amount = request.amount)
)]
pub async fn create_withdrawal(
    client: &ApiClient,
    request: &NewWithdrawalRequest,
) -> Result<WithdrawalRequest> {
    validate_withdrawal(request)?;
    let created: WithdrawalRequest = client.post(endpoints::WITHDRAWALS, request).await?;
    tracing::info!(id = created.id, "Withdrawal request created");
    Ok(created)
}
