#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use recovery_core::config::Config;
use recovery_core::domain::WalletRecord;
use recovery_core::gateway::{GatewayFailure, LookupPayload, RecoveryGateway};
use recovery_core::storage::{MemoryCache, MemoryWalletStore};
use recovery_core::wizard::RecoverySession;

/// One recorded gateway call, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    WalletExists(String),
    Lookup(String),
    Overwrite { address: String, password: String },
}

/// Gateway double that replays queued results and records every call.
/// Unqueued calls succeed (lookups resolve nothing and return a 404).
#[derive(Default)]
pub struct ScriptedGateway {
    exists: Mutex<VecDeque<Result<(), GatewayFailure>>>,
    lookups: Mutex<VecDeque<Result<LookupPayload, GatewayFailure>>>,
    overwrites: Mutex<VecDeque<Result<(), GatewayFailure>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_exists(&self, result: Result<(), GatewayFailure>) {
        self.exists.lock().unwrap().push_back(result);
    }

    pub fn queue_lookup(&self, result: Result<LookupPayload, GatewayFailure>) {
        self.lookups.lock().unwrap().push_back(result);
    }

    pub fn queue_overwrite(&self, result: Result<(), GatewayFailure>) {
        self.overwrites.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl RecoveryGateway for ScriptedGateway {
    fn wallet_exists(&self, address: &str) -> Result<(), GatewayFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::WalletExists(address.to_string()));
        self.exists.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn lookup_by_mnemonic(&self, phrase: &str) -> Result<LookupPayload, GatewayFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Lookup(phrase.to_string()));
        self.lookups
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayFailure::status(404)))
    }

    fn overwrite_password(
        &self,
        _phrase: &str,
        wallet_address: &str,
        new_password: &str,
    ) -> Result<(), GatewayFailure> {
        self.calls.lock().unwrap().push(Call::Overwrite {
            address: wallet_address.to_string(),
            password: new_password.to_string(),
        });
        self.overwrites.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub struct TestHarness {
    pub session: RecoverySession,
    pub gateway: Arc<ScriptedGateway>,
    pub wallets: Arc<MemoryWalletStore>,
    pub cache: Arc<MemoryCache>,
}

pub fn harness() -> TestHarness {
    harness_with_records(Vec::new())
}

pub fn harness_with_records(records: Vec<WalletRecord>) -> TestHarness {
    let gateway = Arc::new(ScriptedGateway::new());
    let wallets = Arc::new(MemoryWalletStore::seeded(records));
    let cache = Arc::new(MemoryCache::new());
    let session = RecoverySession::new(
        gateway.clone(),
        wallets.clone(),
        cache.clone(),
        &Config::default(),
    );
    TestHarness {
        session,
        gateway,
        wallets,
        cache,
    }
}

pub fn twelve_words() -> String {
    "ember canyon lotus marble onion prairie quartz raven sable timber umber violet".into()
}

pub fn payload(address: &str, name: &str) -> LookupPayload {
    LookupPayload {
        wallet_address: address.into(),
        wallet_name: Some(name.into()),
        created_at: None,
    }
}
