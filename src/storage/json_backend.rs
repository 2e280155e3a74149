use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::{addresses_match, WalletRecord, WalletSummary};
use crate::utils::persistence::{ensure_dir, write_atomic, PathResolver};

use super::{Result, TransientCache, WalletStore};

/// File-backed implementation of both local-state ports. Wallet records and
/// the recovered-wallet slot live as JSON documents under one base
/// directory; writes are staged to a temporary file and renamed into place.
pub struct JsonStorage {
    base_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        ensure_dir(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Seeds the wallet file when no records exist yet.
    pub fn seed_if_empty(&self, records: Vec<WalletRecord>) -> Result<()> {
        if self.read_wallets()?.is_empty() {
            self.write_wallets(&records)?;
        }
        Ok(())
    }

    fn wallets_path(&self) -> PathBuf {
        PathResolver::wallets_file_in(&self.base_dir)
    }

    fn cache_path(&self) -> PathBuf {
        PathResolver::recovered_wallet_file_in(&self.base_dir)
    }

    fn read_wallets(&self) -> Result<Vec<WalletRecord>> {
        let path = self.wallets_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_wallets(&self, records: &[WalletRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.wallets_path(), &json)?;
        Ok(())
    }
}

impl TransientCache for JsonStorage {
    fn put_recovered_wallet(&self, wallet: &WalletSummary) -> Result<()> {
        let json = serde_json::to_string_pretty(wallet)?;
        write_atomic(&self.cache_path(), &json)?;
        Ok(())
    }

    fn recovered_wallet(&self) -> Result<Option<WalletSummary>> {
        let path = self.cache_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn clear_recovered_wallet(&self) -> Result<()> {
        let path = self.cache_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl WalletStore for JsonStorage {
    fn list(&self) -> Result<Vec<WalletRecord>> {
        self.read_wallets()
    }

    fn find_by_address(&self, address: &str) -> Result<Option<WalletRecord>> {
        Ok(self
            .read_wallets()?
            .into_iter()
            .find(|record| addresses_match(&record.address, address)))
    }

    fn update_password(&self, id: Uuid, new_password: &str) -> Result<bool> {
        let mut records = self.read_wallets()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(false);
        };
        record.password = Some(new_password.to_string());
        self.write_wallets(&records)?;
        Ok(true)
    }
}
