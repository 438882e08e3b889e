//! # Hosted Payments
//!
//! Starts a provider checkout for a card or crypto deposit. The returned
//! session carries the URL the user is sent to; completion is reported to the
//! backend by the provider, not by this client.

use lib_utils::validation::validate_positive_amount;
use shared::{PaymentInitRequest, PaymentProvider, PaymentSession};

use super::client::ApiClient;
use crate::core::error::{ApiError, Result};

pub(crate) fn validate_payment(provider: PaymentProvider, amount: f64) -> Result<()> {
    validate_positive_amount(amount, "Amount").map_err(ApiError::Validation)?;
    let minimum = provider.minimum_amount();
    if amount < minimum {
        return Err(ApiError::Validation(format!(
            "Minimum deposit is ${minimum:.2}"
        )));
    }
    Ok(())
}

#[tracing::instrument(skip(client), fields(provider = ?provider))]
pub async fn initiate_payment(
    client: &ApiClient,
    provider: PaymentProvider,
    amount: f64,
) -> Result<PaymentSession> {
    validate_payment(provider, amount)?;
    let session: PaymentSession = client
        .post(provider.path(), &PaymentInitRequest { amount })
        .await?;

    if session.hosted_url.is_none() {
        tracing::warn!("Payment session has no hosted URL");
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_minimums() {
        assert!(validate_payment(PaymentProvider::Stripe, 5.0).is_ok());
        assert_eq!(
            validate_payment(PaymentProvider::Coinbase, 5.0),
            Err(ApiError::Validation("Minimum deposit is $10.00".to_string()))
        );
        assert!(validate_payment(PaymentProvider::Stripe, 0.0).is_err());
    }
}
