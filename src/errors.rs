use thiserror::Error;

use crate::gateway::GatewayFailure;
use crate::storage::StorageError;

/// Unified error type for the recovery core layers.
#[derive(Error, Debug)]
pub enum RecoveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Gateway(#[from] GatewayFailure),
}

pub type Result<T> = std::result::Result<T, RecoveryError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] RecoveryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid input: {0}")]
    Input(String),
}
