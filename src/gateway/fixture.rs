//! Deterministic in-memory gateway used by the demo CLI and the tests. It
//! reproduces the documented status-code surface of the real service:
//! 404 for unknown addresses and phrases, 400 for malformed phrases, 401 for
//! a phrase that derives a different wallet, and 429 once the configured
//! attempt allowance is exhausted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::domain::{addresses_match, WalletRecord};
use crate::wizard::validation::{MIN_PASSWORD_LEN, MNEMONIC_WORD_COUNT};

use super::{GatewayFailure, LookupPayload, RecoveryGateway};

/// One wallet the fixture service knows about.
#[derive(Debug, Clone)]
pub struct FixtureWallet {
    pub name: String,
    pub address: String,
    pub phrase: String,
    pub created_at: DateTime<Utc>,
}

impl FixtureWallet {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phrase: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phrase: phrase.into(),
            created_at,
        }
    }
}

static DEMO_WALLETS: Lazy<Vec<FixtureWallet>> = Lazy::new(|| {
    vec![
        FixtureWallet::new(
            "Savings",
            "0x5avings00cafe42",
            "ember canyon lotus marble onion prairie quartz raven sable timber umber violet",
            Utc.with_ymd_and_hms(2024, 3, 11, 9, 30, 0).unwrap(),
        ),
        FixtureWallet::new(
            "Spending",
            "0x5pending00beef7",
            "anchor basket cedar dolphin envelope fossil garnet harbor island jungle kettle ladder",
            Utc.with_ymd_and_hms(2024, 7, 2, 18, 5, 0).unwrap(),
        ),
    ]
});

/// Local wallet records matching the demo fixture, used to seed an empty
/// wallet store so address selection and post-reset reconciliation have
/// something to work with.
pub fn demo_records() -> Vec<WalletRecord> {
    DEMO_WALLETS
        .iter()
        .map(|wallet| {
            let mut record = WalletRecord::new(wallet.name.clone(), wallet.address.clone());
            record.created_at = wallet.created_at;
            record
        })
        .collect()
}

pub struct FixtureGateway {
    wallets: Vec<FixtureWallet>,
    offline: AtomicBool,
    lookup_attempts: Mutex<u32>,
    rate_limit_after: Option<u32>,
}

impl FixtureGateway {
    pub fn new(wallets: Vec<FixtureWallet>) -> Self {
        Self {
            wallets,
            offline: AtomicBool::new(false),
            lookup_attempts: Mutex::new(0),
            rate_limit_after: None,
        }
    }

    /// Gateway seeded with the demo wallets.
    pub fn demo() -> Self {
        Self::new(DEMO_WALLETS.clone())
    }

    /// Rejects lookups with a 429 once more than `attempts` have been made.
    pub fn with_rate_limit(mut self, attempts: u32) -> Self {
        self.rate_limit_after = Some(attempts);
        self
    }

    /// Simulates losing the connection; every call fails with a transport
    /// error until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), GatewayFailure> {
        if self.offline.load(Ordering::SeqCst) {
            Err(GatewayFailure::Network("connection lost".into()))
        } else {
            Ok(())
        }
    }

    fn find_by_address(&self, address: &str) -> Option<&FixtureWallet> {
        self.wallets
            .iter()
            .find(|wallet| addresses_match(&wallet.address, address))
    }

    fn find_by_phrase(&self, phrase: &str) -> Option<&FixtureWallet> {
        let normalized = normalize(phrase);
        self.wallets
            .iter()
            .find(|wallet| normalize(&wallet.phrase) == normalized)
    }
}

fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl RecoveryGateway for FixtureGateway {
    fn wallet_exists(&self, address: &str) -> Result<(), GatewayFailure> {
        self.check_online()?;
        if self.find_by_address(address).is_some() {
            Ok(())
        } else {
            Err(GatewayFailure::status(404))
        }
    }

    fn lookup_by_mnemonic(&self, phrase: &str) -> Result<LookupPayload, GatewayFailure> {
        self.check_online()?;
        if let Some(limit) = self.rate_limit_after {
            let mut attempts = self
                .lookup_attempts
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *attempts += 1;
            if *attempts > limit {
                return Err(GatewayFailure::status(429));
            }
        }
        if phrase.split_whitespace().count() != MNEMONIC_WORD_COUNT {
            return Err(GatewayFailure::status_with_body(400, "malformed mnemonic"));
        }
        match self.find_by_phrase(phrase) {
            Some(wallet) => Ok(LookupPayload {
                wallet_address: wallet.address.clone(),
                wallet_name: Some(wallet.name.clone()),
                created_at: Some(wallet.created_at),
            }),
            None => Err(GatewayFailure::status(404)),
        }
    }

    fn overwrite_password(
        &self,
        phrase: &str,
        wallet_address: &str,
        new_password: &str,
    ) -> Result<(), GatewayFailure> {
        self.check_online()?;
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(GatewayFailure::status_with_body(
                400,
                "password does not meet requirements",
            ));
        }
        let Some(wallet) = self.find_by_address(wallet_address) else {
            return Err(GatewayFailure::status(404));
        };
        if normalize(&wallet.phrase) != normalize(phrase) {
            return Err(GatewayFailure::status(401));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_phrase() -> &'static str {
        "ember canyon lotus marble onion prairie quartz raven sable timber umber violet"
    }

    #[test]
    fn lookup_resolves_the_demo_wallet() {
        let gateway = FixtureGateway::demo();
        let payload = gateway.lookup_by_mnemonic(demo_phrase()).unwrap();
        assert_eq!(payload.wallet_name.as_deref(), Some("Savings"));
    }

    #[test]
    fn lookup_rejects_a_malformed_phrase_with_400() {
        let gateway = FixtureGateway::demo();
        let err = gateway.lookup_by_mnemonic("too few words").unwrap_err();
        assert_eq!(err, GatewayFailure::status_with_body(400, "malformed mnemonic"));
    }

    #[test]
    fn overwrite_rejects_the_wrong_phrase_with_401() {
        let gateway = FixtureGateway::demo();
        let wrong =
            "anchor basket cedar dolphin envelope fossil garnet harbor island jungle kettle ladder";
        let err = gateway
            .overwrite_password(wrong, "0x5avings00cafe42", "Abc12345")
            .unwrap_err();
        assert_eq!(err, GatewayFailure::status(401));
    }

    #[test]
    fn rate_limit_kicks_in_after_the_allowance() {
        let gateway = FixtureGateway::demo().with_rate_limit(1);
        assert!(gateway.lookup_by_mnemonic(demo_phrase()).is_ok());
        let err = gateway.lookup_by_mnemonic(demo_phrase()).unwrap_err();
        assert_eq!(err, GatewayFailure::status(429));
    }

    #[test]
    fn offline_mode_surfaces_transport_failures() {
        let gateway = FixtureGateway::demo();
        gateway.set_offline(true);
        assert!(matches!(
            gateway.wallet_exists("0x5avings00cafe42"),
            Err(GatewayFailure::Network(_))
        ));
    }
}
