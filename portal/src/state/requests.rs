//! # Financial Request Lists
//!
//! The deposit and withdrawal history views. A list starts out loading, keeps
//! the last good items when a refresh fails, and clears `loading` whatever the
//! outcome.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::{
    DepositRequest, FinancialRequest, NewDepositRequest, NewWithdrawalRequest, RequestStatus,
    WithdrawalRequest,
};

use crate::core::error::{ApiError, Result};
use crate::core::service::ApiService;

/// A record kind that can be listed and created through [`ApiService`].
#[async_trait]
pub trait RequestSource: FinancialRequest + Clone + Send + Sync + 'static {
    type New: Send + 'static;

    /// Used in log lines and fallback messages.
    const LABEL: &'static str;

    async fn list(api: &dyn ApiService) -> Result<Vec<Self>>;
    async fn create(api: &dyn ApiService, new: Self::New) -> Result<Self>;
}

#[async_trait]
impl RequestSource for DepositRequest {
    type New = NewDepositRequest;
    const LABEL: &'static str = "deposit";

    async fn list(api: &dyn ApiService) -> Result<Vec<Self>> {
        api.list_deposits().await
    }

    async fn create(api: &dyn ApiService, new: NewDepositRequest) -> Result<Self> {
        api.create_deposit(new).await
    }
}

#[async_trait]
impl RequestSource for WithdrawalRequest {
    type New = NewWithdrawalRequest;
    const LABEL: &'static str = "withdrawal";

    async fn list(api: &dyn ApiService) -> Result<Vec<Self>> {
        api.list_withdrawals().await
    }

    async fn create(api: &dyn ApiService, new: NewWithdrawalRequest) -> Result<Self> {
        api.create_withdrawal(new).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestListSnapshot<T> {
    pub loading: bool,
    pub error: Option<ApiError>,
    pub items: Vec<T>,
}

impl<T> Default for RequestListSnapshot<T> {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            items: Vec::new(),
        }
    }
}

pub struct RequestList<T> {
    api: Arc<dyn ApiService>,
    state: RwLock<RequestListSnapshot<T>>,
}

pub type DepositList = RequestList<DepositRequest>;
pub type WithdrawalList = RequestList<WithdrawalRequest>;

impl<T: RequestSource> RequestList<T> {
    /// An empty list in the loading state. Call [`RequestList::refresh`] to fill it.
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            state: RwLock::new(RequestListSnapshot::default()),
        }
    }

    /// Create and fetch once.
    pub async fn load(api: Arc<dyn ApiService>) -> Self {
        let list = Self::new(api);
        // The failure is kept in the snapshot.
        let _ = list.refresh().await;
        list
    }

    pub fn snapshot(&self) -> RequestListSnapshot<T> {
        self.state.read().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.read().items.clone()
    }

    /// Requests still waiting for a decision.
    pub fn pending(&self) -> Vec<T> {
        self.state
            .read()
            .items
            .iter()
            .filter(|item| item.status() == RequestStatus::Pending)
            .cloned()
            .collect()
    }

    #[tracing::instrument(skip(self), fields(kind = T::LABEL))]
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().loading = true;

        let result = T::list(self.api.as_ref()).await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Loaded requests");
                state.items = items;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load requests");
                state.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// File a new request, then reload the list so it shows up.
    #[tracing::instrument(skip(self, new), fields(kind = T::LABEL))]
    pub async fn submit(&self, new: T::New) -> Result<T> {
        let created = T::create(self.api.as_ref(), new).await?;
        tracing::info!(id = created.id(), "Request submitted");

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Created request but reload failed");
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::mock::MockApi;
    use shared::{Currency, DepositBank};

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let list = DepositList::new(Arc::new(MockApi::default()));
        let snapshot = list.snapshot();
        assert!(snapshot.loading);
        assert!(snapshot.items.is_empty());
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_submit_then_list() {
        let api = Arc::new(MockApi::default());
        let list = DepositList::load(api.clone()).await;
        assert!(!list.snapshot().loading);

        let created = list
            .submit(NewDepositRequest::new(DepositBank::SogeBank, 250.0).with_message("rent"))
            .await
            .unwrap();

        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(list.items(), vec![created.clone()]);
        assert_eq!(list.pending().len(), 1);
        assert_eq!(api.calls(), vec!["list_deposits", "create_deposit", "list_deposits"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_error_and_clears_loading() {
        let api = Arc::new(MockApi::failing(ApiError::Network {
            origin: "http://127.0.0.1:9".to_string(),
            reason: "connection refused".to_string(),
        }));
        let list = WithdrawalList::load(api).await;

        let snapshot = list.snapshot();
        assert!(!snapshot.loading);
        assert!(snapshot.error.as_ref().is_some_and(ApiError::is_network));
        assert!(snapshot.items.is_empty());
    }

    #[tokio::test]
    async fn test_withdrawal_submit() {
        let api = Arc::new(MockApi::default());
        let list = WithdrawalList::new(api);

        let created = list
            .submit(NewWithdrawalRequest::crypto_external(Currency::Btc, "bc1qexample", 0.5))
            .await
            .unwrap();

        assert_eq!(created.currency, "BTC");
        assert_eq!(list.pending(), vec![created]);
    }
}
