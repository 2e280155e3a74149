use std::collections::BTreeMap;

use crate::domain::WalletSummary;

/// Which of the two supported recovery flows the user is in. Chosen once on
/// the mode-selection screen; changing it requires a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    #[default]
    Unselected,
    KnownWallet,
    ForgotWallet,
}

/// How the wallet is identified in `KnownWallet` step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletInputMode {
    #[default]
    Select,
    Manual,
}

/// Identifies the input a validation or gateway message is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldId {
    WalletChoice,
    WalletAddress,
    RecoveryPhrase,
    NewPassword,
    ConfirmPassword,
}

/// One flag per asynchronous gate. In practice at most one is set at a time,
/// but they are modeled independently so the UI can disable all forward
/// controls whenever any of them is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingFlags {
    pub verifying_wallet: bool,
    pub recovering_wallet: bool,
    pub submitting: bool,
}

impl PendingFlags {
    pub fn any(&self) -> bool {
        self.verifying_wallet || self.recovering_wallet || self.submitting
    }
}

/// Number of steps each mode walks through after mode selection.
pub const STEPS_PER_MODE: u8 = 3;

/// The wizard's single source of truth. Mutated exclusively by
/// [`WizardStateMachine`](crate::wizard::machine::WizardStateMachine).
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub mode: RecoveryMode,
    /// 0 is the mode-selection screen, 1..=`total_steps` the mode's steps.
    pub step: u8,
    /// 0 until a mode is chosen, then fixed at [`STEPS_PER_MODE`].
    pub total_steps: u8,
    pub wallet_input_mode: WalletInputMode,
    pub selected_wallet: Option<WalletSummary>,
    pub manual_address: String,
    pub recovery_phrase: String,
    /// Populated only in `ForgotWallet` mode by a successful lookup.
    pub recovered_wallet: Option<WalletSummary>,
    pub new_password: String,
    pub confirm_password: String,
    /// At most one message per field; a slot is cleared when its field is
    /// edited, not when validation reruns.
    pub field_errors: BTreeMap<FieldId, String>,
    pub pending: PendingFlags,
    pub submitted: bool,
}

impl WizardState {
    /// Tokenized recovery phrase: whitespace runs separate words, empty
    /// tokens are discarded. Always derived, never stored.
    pub fn phrase_words(&self) -> Vec<&str> {
        self.recovery_phrase.split_whitespace().collect()
    }

    /// The phrase re-joined with single spaces, as sent to the gateway.
    pub fn normalized_phrase(&self) -> String {
        self.phrase_words().join(" ")
    }

    /// The address picked or typed in `KnownWallet` step 1.
    pub fn chosen_address(&self) -> Option<&str> {
        match self.wallet_input_mode {
            WalletInputMode::Manual => {
                let trimmed = self.manual_address.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            WalletInputMode::Select => {
                self.selected_wallet.as_ref().map(|w| w.address.as_str())
            }
        }
    }

    /// The wallet address the password overwrite will target, if the flow
    /// has progressed far enough to know it.
    pub fn target_address(&self) -> Option<&str> {
        match self.mode {
            RecoveryMode::KnownWallet => self.chosen_address(),
            RecoveryMode::ForgotWallet => {
                self.recovered_wallet.as_ref().map(|w| w.address.as_str())
            }
            RecoveryMode::Unselected => None,
        }
    }

    pub fn set_field(&mut self, field: FieldId, value: String) {
        match field {
            FieldId::WalletAddress => self.manual_address = value,
            FieldId::RecoveryPhrase => self.recovery_phrase = value,
            FieldId::NewPassword => self.new_password = value,
            FieldId::ConfirmPassword => self.confirm_password = value,
            // The wallet choice is set through its own event; an edit on the
            // slot only clears a stale error.
            FieldId::WalletChoice => {}
        }
        self.field_errors.remove(&field);
    }

    /// Full field reset, applied when leaving step 1 backwards or on an
    /// explicit reset. The two modes do not share a field shape, so partial
    /// progress is discarded entirely.
    pub fn clear_mode_fields(&mut self) {
        self.mode = RecoveryMode::Unselected;
        self.step = 0;
        self.total_steps = 0;
        self.wallet_input_mode = WalletInputMode::default();
        self.selected_wallet = None;
        self.manual_address.clear();
        self.recovery_phrase.clear();
        self.recovered_wallet = None;
        self.new_password.clear();
        self.confirm_password.clear();
        self.field_errors.clear();
        self.submitted = false;
    }
}
