use std::sync::Arc;

use recovery_core::cli::{self, output};
use recovery_core::config::ConfigManager;
use recovery_core::errors::CliError;
use recovery_core::gateway::fixture::{demo_records, FixtureGateway};
use recovery_core::storage::{JsonStorage, TransientCache, WalletStore};
use recovery_core::utils::persistence::PathResolver;
use recovery_core::wizard::RecoverySession;

fn main() {
    recovery_core::init();
    if let Err(err) = run() {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let base = config
        .data_dir
        .clone()
        .unwrap_or_else(PathResolver::base_dir);

    let storage = Arc::new(JsonStorage::new(base)?);
    storage.seed_if_empty(demo_records())?;

    let wallets: Arc<dyn WalletStore> = storage.clone();
    let cache: Arc<dyn TransientCache> = storage;
    let gateway = Arc::new(FixtureGateway::demo());

    let session = RecoverySession::new(gateway, wallets.clone(), cache, &config);
    cli::run(session, wallets)
}
