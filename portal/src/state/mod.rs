//! # Client State
//!
//! Shared session attributes and the account views built on them.
//!
//! ```text
//! state/
//! ├── keys.rs       - StoreKey, Notification
//! ├── storage.rs    - Storage trait, MemoryStorage, FileStorage
//! ├── store.rs      - SessionStore, Subscription
//! ├── attribute.rs  - SyncedAttribute (read-then-subscribe)
//! ├── requests.rs   - Deposit/withdrawal lists
//! └── wallet.rs     - Wallet balances and exchange
//! ```

pub mod attribute;
pub mod keys;
pub mod requests;
pub mod storage;
pub mod store;
pub mod wallet;

pub use attribute::SyncedAttribute;
pub use keys::{Notification, StoreKey};
pub use requests::{DepositList, RequestList, RequestListSnapshot, RequestSource, WithdrawalList};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{SessionStore, Subscription};
pub use wallet::{WalletSnapshot, WalletView};
