//! Local state the recovery flow touches: the persisted wallet records and
//! the transient handoff slot for a freshly recovered wallet. Both are
//! modeled as ports so tests can swap the file backend for memory.

pub mod json_backend;
pub mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{WalletRecord, WalletSummary};

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One slot holding the most recently recovered wallet, written by the
/// ForgotWallet lookup and cleared on success or abandonment, so the next
/// surface can reuse the payload without re-deriving it from the mnemonic.
pub trait TransientCache: Send + Sync {
    fn put_recovered_wallet(&self, wallet: &WalletSummary) -> Result<()>;
    fn recovered_wallet(&self) -> Result<Option<WalletSummary>>;
    fn clear_recovered_wallet(&self) -> Result<()>;
}

/// Read access to the locally persisted wallet records plus the single
/// best-effort write the flow performs after a successful overwrite.
pub trait WalletStore: Send + Sync {
    fn list(&self) -> Result<Vec<WalletRecord>>;
    fn find_by_address(&self, address: &str) -> Result<Option<WalletRecord>>;
    /// Returns whether a record was updated.
    fn update_password(&self, id: Uuid, new_password: &str) -> Result<bool>;
}

pub use json_backend::JsonStorage;
pub use memory::{MemoryCache, MemoryWalletStore};
