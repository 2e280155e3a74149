use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::{addresses_match, WalletRecord, WalletSummary};

use super::{Result, TransientCache, WalletStore};

/// In-memory transient cache, the test stand-in for the file-backed slot.
#[derive(Default)]
pub struct MemoryCache {
    slot: Mutex<Option<WalletSummary>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransientCache for MemoryCache {
    fn put_recovered_wallet(&self, wallet: &WalletSummary) -> Result<()> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(wallet.clone());
        Ok(())
    }

    fn recovered_wallet(&self) -> Result<Option<WalletSummary>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn clear_recovered_wallet(&self) -> Result<()> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

/// In-memory wallet records.
#[derive(Default)]
pub struct MemoryWalletStore {
    records: Mutex<Vec<WalletRecord>>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: Vec<WalletRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl WalletStore for MemoryWalletStore {
    fn list(&self) -> Result<Vec<WalletRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn find_by_address(&self, address: &str) -> Result<Option<WalletRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|record| addresses_match(&record.address, address))
            .cloned())
    }

    fn update_password(&self, id: Uuid, new_password: &str) -> Result<bool> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.password = Some(new_password.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
