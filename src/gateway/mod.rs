//! The external service boundary the wizard depends on but does not
//! implement: wallet-existence checks, mnemonic lookups, and the password
//! overwrite. Transport is a collaborator's concern; the wizard only sees
//! status-shaped rejections and transport failures.

pub mod fixture;
pub mod taxonomy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::WalletSummary;

/// A failed gateway call. `Status` mirrors an HTTP-shaped rejection,
/// `Network` covers everything that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayFailure {
    #[error("request rejected with status {status}")]
    Status { status: u16, body: Option<String> },
    #[error("network failure: {0}")]
    Network(String),
}

impl GatewayFailure {
    pub fn status(status: u16) -> Self {
        Self::Status { status, body: None }
    }

    pub fn status_with_body(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: Some(body.into()),
        }
    }
}

/// Successful mnemonic lookup payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupPayload {
    pub wallet_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl LookupPayload {
    pub fn into_summary(self) -> WalletSummary {
        WalletSummary {
            id: None,
            name: self.wallet_name.unwrap_or_else(|| "Recovered wallet".into()),
            address: self.wallet_address,
            created_at: self.created_at,
        }
    }
}

/// The three recovery operations. Implementations are expected to be
/// synchronous from the wizard's point of view; the machine serializes the
/// calls so at most one is ever in flight per wizard session.
pub trait RecoveryGateway: Send + Sync {
    /// Succeeds iff the address belongs to a registered wallet.
    fn wallet_exists(&self, address: &str) -> Result<(), GatewayFailure>;

    /// Resolves a recovery phrase to the wallet it derives.
    fn lookup_by_mnemonic(&self, phrase: &str) -> Result<LookupPayload, GatewayFailure>;

    /// Overwrites the wallet password. The ack carries no payload.
    fn overwrite_password(
        &self,
        phrase: &str,
        wallet_address: &str,
        new_password: &str,
    ) -> Result<(), GatewayFailure>;
}
