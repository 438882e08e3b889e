use serde::{Deserialize, Serialize};

/// Hosted payment providers that can fund a deposit directly.
///
/// Manual bank deposits go through [`super::NewDepositRequest`] instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Coinbase,
    Stripe,
}

impl PaymentProvider {
    pub fn path(&self) -> &'static str {
        match self {
            PaymentProvider::Coinbase => "/coinbase/",
            PaymentProvider::Stripe => "/stripe/",
        }
    }

    /// Smallest deposit the provider accepts, in USD.
    pub fn minimum_amount(&self) -> f64 {
        match self {
            PaymentProvider::Coinbase => 10.0,
            PaymentProvider::Stripe => 5.0,
        }
    }
}

/// Deposit initiation body (`POST /coinbase/`, `POST /stripe/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentInitRequest {
    pub amount: f64,
}

/// Provider checkout session. Coinbase returns `hosted_url`; the remaining
/// provider-specific fields are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaymentSession {
    #[serde(default)]
    pub hosted_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coinbase_session_keeps_extra_fields() {
        let session: PaymentSession =
            serde_json::from_str(r#"{"hosted_url":"https://commerce.example/pay/1","code":"ABC"}"#)
                .unwrap();
        assert_eq!(session.hosted_url.as_deref(), Some("https://commerce.example/pay/1"));
        assert_eq!(session.extra["code"], "ABC");
    }

    #[test]
    fn test_provider_paths() {
        assert_eq!(PaymentProvider::Coinbase.path(), "/coinbase/");
        assert_eq!(PaymentProvider::Stripe.path(), "/stripe/");
    }
}
