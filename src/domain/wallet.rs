use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only projection of a wallet, supplied either by the local wallet
/// listing or by a successful mnemonic lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    /// Present only for wallets that exist as local records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Locally persisted wallet record. The recovery flow only ever reads these
/// and, after a successful password overwrite, refreshes the cached password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WalletRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            password: None,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> WalletSummary {
        WalletSummary {
            id: Some(self.id),
            name: self.name.clone(),
            address: self.address.clone(),
            created_at: Some(self.created_at),
        }
    }
}

/// Wallet addresses compare case-insensitively; surrounding whitespace is
/// ignored.
pub fn addresses_match(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_match_is_case_insensitive() {
        assert!(addresses_match("0xAbCd1234", "0xabcd1234"));
        assert!(addresses_match(" 0xabc ", "0xABC"));
        assert!(!addresses_match("0xabc", "0xabd"));
    }

    #[test]
    fn record_summary_carries_the_local_id() {
        let record = WalletRecord::new("Savings", "0xfeed1234beef");
        let summary = record.summary();
        assert_eq!(summary.id, Some(record.id));
        assert_eq!(summary.address, record.address);
    }
}
