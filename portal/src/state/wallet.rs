//! # Wallet View
//!
//! Balances are fetched on demand and never pushed; a snapshot is only as
//! fresh as the last [`WalletView::refresh`].

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Currency, ExchangeRequest, ExchangeResponse, WalletBalance};

use crate::core::error::{ApiError, Result};
use crate::core::service::ApiService;

#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub loading: bool,
    pub error: Option<ApiError>,
    /// The USD wallet.
    pub fiat: Option<WalletBalance>,
    pub crypto: Vec<WalletBalance>,
}

impl Default for WalletSnapshot {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            fiat: None,
            crypto: Vec::new(),
        }
    }
}

impl WalletSnapshot {
    /// Balance held in `currency`, if the account has such a wallet.
    pub fn balance_of(&self, currency: Currency) -> Option<f64> {
        self.fiat
            .iter()
            .chain(self.crypto.iter())
            .find(|wallet| wallet.currency.eq_ignore_ascii_case(currency.code()))
            .map(|wallet| wallet.balance)
    }
}

pub struct WalletView {
    api: Arc<dyn ApiService>,
    state: RwLock<WalletSnapshot>,
}

impl WalletView {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            state: RwLock::new(WalletSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.state.read().clone()
    }

    pub fn balance_of(&self, currency: Currency) -> Option<f64> {
        self.state.read().balance_of(currency)
    }

    /// Fetch the fiat wallet, then the crypto wallets.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().loading = true;

        let result = async {
            let fiat = self.api.wallet_info().await?;
            let crypto = self.api.crypto_wallets().await?;
            Ok::<_, ApiError>((fiat, crypto))
        }
        .await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok((fiat, crypto)) => {
                state.fiat = Some(fiat);
                state.crypto = crypto;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load balances");
                state.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Submit an exchange and reload balances.
    #[tracing::instrument(skip(self))]
    pub async fn exchange(&self, from: Currency, to: Currency, amount: f64) -> Result<ExchangeResponse> {
        let response = self
            .api
            .exchange(ExchangeRequest {
                from_currency: from,
                to_currency: to,
                amount,
            })
            .await?;

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Exchange succeeded but balance reload failed");
        }
        Ok(response)
    }
}
