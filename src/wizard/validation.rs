//! Synchronous, per-mode, per-step validation. Pure string-level checks so
//! every rule is unit-testable without any I/O.

use std::fmt;

use super::state::{FieldId, RecoveryMode, WalletInputMode, WizardState};

pub const MNEMONIC_WORD_COUNT: usize = 12;
pub const MIN_ADDRESS_LEN: usize = 10;
pub const MIN_PASSWORD_LEN: usize = 8;

pub const MSG_WALLET_REQUIRED: &str = "Select a wallet to continue.";
pub const MSG_ADDRESS_REQUIRED: &str = "Enter your wallet address.";
pub const MSG_ADDRESS_TOO_SHORT: &str =
    "Enter the full wallet address (at least 10 characters).";
pub const MSG_PHRASE_REQUIRED: &str = "Enter your recovery phrase.";
pub const MSG_PHRASE_WORD_COUNT: &str =
    "The recovery phrase must contain exactly 12 words.";
pub const MSG_NO_RECOVERED_WALLET: &str =
    "Recover your wallet with its phrase before continuing.";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Runs the synchronous rules registered for `(mode, step)`. Returns an
/// empty list when the step may advance (pending any asynchronous gate).
pub fn validate(mode: RecoveryMode, step: u8, state: &WizardState) -> Vec<FieldError> {
    match (mode, step) {
        (RecoveryMode::KnownWallet, 1) => validate_wallet_choice(state),
        (RecoveryMode::KnownWallet, 2) => validate_phrase(state, true),
        (RecoveryMode::ForgotWallet, 1) => validate_phrase(state, false),
        (RecoveryMode::ForgotWallet, 2) => validate_recovered_wallet(state),
        (RecoveryMode::KnownWallet, 3) | (RecoveryMode::ForgotWallet, 3) => {
            validate_passwords(state)
        }
        _ => Vec::new(),
    }
}

fn validate_wallet_choice(state: &WizardState) -> Vec<FieldError> {
    match state.wallet_input_mode {
        WalletInputMode::Select => {
            if state.selected_wallet.is_none() {
                vec![FieldError::new(FieldId::WalletChoice, MSG_WALLET_REQUIRED)]
            } else {
                Vec::new()
            }
        }
        WalletInputMode::Manual => {
            let address = state.manual_address.trim();
            if address.is_empty() {
                vec![FieldError::new(FieldId::WalletAddress, MSG_ADDRESS_REQUIRED)]
            } else if address.len() < MIN_ADDRESS_LEN {
                vec![FieldError::new(
                    FieldId::WalletAddress,
                    MSG_ADDRESS_TOO_SHORT,
                )]
            } else {
                Vec::new()
            }
        }
    }
}

fn validate_phrase(state: &WizardState, require_non_empty: bool) -> Vec<FieldError> {
    if require_non_empty && state.recovery_phrase.trim().is_empty() {
        return vec![FieldError::new(FieldId::RecoveryPhrase, MSG_PHRASE_REQUIRED)];
    }
    // Same message whichever side of twelve the count falls on.
    if state.phrase_words().len() != MNEMONIC_WORD_COUNT {
        return vec![FieldError::new(
            FieldId::RecoveryPhrase,
            MSG_PHRASE_WORD_COUNT,
        )];
    }
    Vec::new()
}

fn validate_recovered_wallet(state: &WizardState) -> Vec<FieldError> {
    if state.recovered_wallet.is_none() {
        vec![FieldError::new(
            FieldId::RecoveryPhrase,
            MSG_NO_RECOVERED_WALLET,
        )]
    } else {
        Vec::new()
    }
}

fn validate_passwords(state: &WizardState) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if state.new_password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            FieldId::NewPassword,
            MSG_PASSWORD_TOO_SHORT,
        ));
    }
    if state.new_password != state.confirm_password {
        errors.push(FieldError::new(
            FieldId::ConfirmPassword,
            MSG_PASSWORD_MISMATCH,
        ));
    }
    errors
}
