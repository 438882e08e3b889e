use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Currencies the exchange supports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Usdt,
    Btc,
    Eth,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usdt, Currency::Usd, Currency::Btc, Currency::Eth];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Usdt => "USDT",
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
        }
    }

    /// `USD` is the only fiat currency; everything else settles on-chain.
    pub fn is_crypto(&self) -> bool {
        !matches!(self, Currency::Usd)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One wallet balance (`GET /wallet-info/`, items of `GET /crypto-wallets/`).
///
/// A snapshot only: callers re-fetch rather than cache it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletBalance {
    pub currency: String,
    #[serde(deserialize_with = "de_amount")]
    pub balance: f64,
}

/// Currency exchange (`POST /exchange/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRequest {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub amount: f64,
}

/// Exchange acknowledgement. The backend computes the rate; the client only
/// surfaces its message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExchangeResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decimal fields come back either as JSON numbers or as decimal strings
/// (`"100.00"`), depending on the backend serializer.
pub fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {text:?}"))),
    }
}
