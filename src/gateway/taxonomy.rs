//! Central mapping from gateway failures to field-scoped, human-readable
//! messages. The same status code means different things depending on the
//! operation in flight, so every call site funnels through this one table.

use super::GatewayFailure;
use crate::wizard::state::FieldId;

/// Which gateway call produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    WalletExists,
    Lookup,
    Overwrite,
}

/// Transport-independent failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    InvalidFormat,
    PhraseMismatch,
    ServerFault,
    NetworkFailure,
}

/// A failure translated into the triple the wizard attaches to its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedError {
    pub field: FieldId,
    pub kind: ErrorKind,
    pub message: String,
}

pub const MSG_ADDRESS_NOT_REGISTERED: &str = "This wallet address is not registered.";
pub const MSG_PHRASE_NO_WALLET: &str = "No wallet matches this recovery phrase.";
pub const MSG_PHRASE_INVALID: &str = "This recovery phrase is not valid.";
pub const MSG_PHRASE_WALLET_MISMATCH: &str =
    "The recovery phrase doesn't match this wallet.";
pub const MSG_WALLET_GONE: &str = "This wallet is no longer registered.";
pub const MSG_PASSWORD_REJECTED: &str =
    "The server rejected the new password. Choose a different one.";
pub const MSG_RATE_LIMITED: &str = "Too many attempts. Wait a moment before trying again.";
pub const MSG_SERVER_FAULT: &str = "Something went wrong. Please try again.";
pub const MSG_NETWORK: &str = "Network error. Check your connection and try again.";

/// Classifies a failure per operation. Note the deliberate asymmetry: a 500
/// during lookup means the phrase could not be resolved, while a 500 during
/// overwrite means the phrase did not match the target wallet.
pub fn classify(operation: Operation, failure: &GatewayFailure) -> ErrorKind {
    let status = match failure {
        GatewayFailure::Network(_) => return ErrorKind::NetworkFailure,
        GatewayFailure::Status { status, .. } => *status,
    };
    match operation {
        Operation::WalletExists => match status {
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            _ => ErrorKind::ServerFault,
        },
        Operation::Lookup => match status {
            400 | 500 => ErrorKind::InvalidFormat,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            _ => ErrorKind::ServerFault,
        },
        Operation::Overwrite => match status {
            400 => ErrorKind::InvalidFormat,
            401 | 500 => ErrorKind::PhraseMismatch,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            _ => ErrorKind::ServerFault,
        },
    }
}

/// Translates a failure into the `(field, message, kind)` triple.
pub fn map_failure(operation: Operation, failure: &GatewayFailure) -> MappedError {
    let kind = classify(operation, failure);
    let (field, message) = match (operation, kind) {
        (Operation::WalletExists, ErrorKind::NotFound) => {
            (FieldId::WalletAddress, MSG_ADDRESS_NOT_REGISTERED)
        }
        (Operation::WalletExists, ErrorKind::NetworkFailure) => {
            (FieldId::WalletAddress, MSG_NETWORK)
        }
        (Operation::WalletExists, ErrorKind::RateLimited) => {
            (FieldId::WalletAddress, MSG_RATE_LIMITED)
        }
        (Operation::WalletExists, _) => (FieldId::WalletAddress, MSG_SERVER_FAULT),

        (Operation::Lookup, ErrorKind::NotFound) => {
            (FieldId::RecoveryPhrase, MSG_PHRASE_NO_WALLET)
        }
        (Operation::Lookup, ErrorKind::InvalidFormat) => {
            (FieldId::RecoveryPhrase, MSG_PHRASE_INVALID)
        }
        (Operation::Lookup, ErrorKind::RateLimited) => {
            (FieldId::RecoveryPhrase, MSG_RATE_LIMITED)
        }
        (Operation::Lookup, ErrorKind::NetworkFailure) => {
            (FieldId::RecoveryPhrase, MSG_NETWORK)
        }
        (Operation::Lookup, _) => (FieldId::RecoveryPhrase, MSG_SERVER_FAULT),

        (Operation::Overwrite, ErrorKind::PhraseMismatch) => {
            (FieldId::RecoveryPhrase, MSG_PHRASE_WALLET_MISMATCH)
        }
        (Operation::Overwrite, ErrorKind::NotFound) => {
            (FieldId::RecoveryPhrase, MSG_WALLET_GONE)
        }
        (Operation::Overwrite, ErrorKind::InvalidFormat) => {
            // The rejection body distinguishes a weak password from a
            // malformed phrase.
            if body_mentions_password(failure) {
                (FieldId::NewPassword, MSG_PASSWORD_REJECTED)
            } else {
                (FieldId::RecoveryPhrase, MSG_PHRASE_INVALID)
            }
        }
        (Operation::Overwrite, ErrorKind::RateLimited) => {
            (FieldId::NewPassword, MSG_RATE_LIMITED)
        }
        (Operation::Overwrite, ErrorKind::NetworkFailure) => {
            (FieldId::NewPassword, MSG_NETWORK)
        }
        (Operation::Overwrite, _) => (FieldId::NewPassword, MSG_SERVER_FAULT),
    };
    MappedError {
        field,
        kind,
        message: message.to_string(),
    }
}

fn body_mentions_password(failure: &GatewayFailure) -> bool {
    match failure {
        GatewayFailure::Status {
            body: Some(body), ..
        } => body.to_ascii_lowercase().contains("password"),
        _ => false,
    }
}
