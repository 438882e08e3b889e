use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wallet::{de_amount, Currency};

/// Backend-owned lifecycle of a deposit or withdrawal request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Banks accepted for manual deposits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DepositBank {
    SogeBank,
    OtherBank,
}

/// Payout channels for USD withdrawals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WithdrawalOption {
    SogeBank,
    OtherBank,
    Cash,
}

/// Destination kind for crypto withdrawals: another account on the platform
/// (`INTERNAL`) or an on-chain address (`EXTERNAL`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoTransferType {
    Internal,
    External,
}

/// Read-only view shared by deposit and withdrawal records.
pub trait FinancialRequest {
    fn id(&self) -> i64;
    fn amount(&self) -> f64;
    fn status(&self) -> RequestStatus;
    fn created_at(&self) -> DateTime<Utc>;
    fn resolved_at(&self) -> Option<DateTime<Utc>>;
}

/// Deposit request record (items of `GET /deposits/create/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepositRequest {
    pub id: i64,
    pub bank_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

impl FinancialRequest for DepositRequest {
    fn id(&self) -> i64 {
        self.id
    }
    fn amount(&self) -> f64 {
        self.amount
    }
    fn status(&self) -> RequestStatus {
        self.status
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }
}

/// New manual deposit (`POST /deposits/create/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDepositRequest {
    pub bank_name: DepositBank,
    pub amount: f64,
    pub message: Option<String>,
}

impl NewDepositRequest {
    pub fn new(bank_name: DepositBank, amount: f64) -> Self {
        Self {
            bank_name,
            amount,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = non_blank(message.into());
        self
    }
}

/// Withdrawal request record (items of `GET /withdrawals/create/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WithdrawalRequest {
    pub id: i64,
    pub currency: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub account_identifier: Option<String>,
    #[serde(default)]
    pub crypto_type: Option<CryptoTransferType>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
}

impl FinancialRequest for WithdrawalRequest {
    fn id(&self) -> i64 {
        self.id
    }
    fn amount(&self) -> f64 {
        self.amount
    }
    fn status(&self) -> RequestStatus {
        self.status
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }
}

/// New withdrawal (`POST /withdrawals/create/`).
///
/// Every field the chosen channel does not use is sent as `null`. Build one
/// with [`NewWithdrawalRequest::bank`], [`NewWithdrawalRequest::cash`],
/// [`NewWithdrawalRequest::crypto_external`] or
/// [`NewWithdrawalRequest::crypto_internal`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWithdrawalRequest {
    pub currency: Currency,
    pub amount: f64,
    pub wallet_address: Option<String>,
    pub option: Option<WithdrawalOption>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub account_identifier: Option<String>,
    pub crypto_type: Option<CryptoTransferType>,
    pub message: Option<String>,
}

impl NewWithdrawalRequest {
    fn empty(currency: Currency, amount: f64) -> Self {
        Self {
            currency,
            amount,
            wallet_address: None,
            option: None,
            account_name: None,
            account_number: None,
            account_identifier: None,
            crypto_type: None,
            message: None,
        }
    }

    /// USD payout to a bank account.
    pub fn bank(
        bank: WithdrawalOption,
        account_name: impl Into<String>,
        account_number: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            option: Some(bank),
            account_name: non_blank(account_name.into()),
            account_number: non_blank(account_number.into()),
            ..Self::empty(Currency::Usd, amount)
        }
    }

    /// USD cash pickup.
    pub fn cash(amount: f64) -> Self {
        Self {
            option: Some(WithdrawalOption::Cash),
            ..Self::empty(Currency::Usd, amount)
        }
    }

    /// Crypto sent to an on-chain address.
    pub fn crypto_external(currency: Currency, wallet_address: impl Into<String>, amount: f64) -> Self {
        Self {
            wallet_address: non_blank(wallet_address.into()),
            crypto_type: Some(CryptoTransferType::External),
            ..Self::empty(currency, amount)
        }
    }

    /// Crypto moved to another account on the platform.
    pub fn crypto_internal(
        currency: Currency,
        account_identifier: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            account_identifier: non_blank(account_identifier.into()),
            crypto_type: Some(CryptoTransferType::Internal),
            ..Self::empty(currency, amount)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = non_blank(message.into());
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
