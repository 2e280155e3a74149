//! The wizard reducer: one immutable-in-spirit state value mutated through a
//! single `apply` entry point. Gateway round trips are modeled as an explicit
//! two-phase transition — `apply` hands back an effect tagged with a
//! generation number, the driver executes it, and the outcome is fed back as
//! a [`WizardEvent::GateResolved`]. Outcomes from a superseded generation are
//! discarded, so a late response can never land on a state that has moved on.

use tracing::{debug, warn};

use crate::domain::{addresses_match, WalletSummary};
use crate::gateway::taxonomy::{self, ErrorKind, Operation};
use crate::gateway::{GatewayFailure, LookupPayload};

use super::notice::Notice;
use super::state::{FieldId, RecoveryMode, WalletInputMode, WizardState, STEPS_PER_MODE};
use super::validation;

/// Events the wizard reacts to. UI input and gateway completions both arrive
/// through this one funnel.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    SelectMode(RecoveryMode),
    SetWalletInputMode(WalletInputMode),
    SelectWallet(WalletSummary),
    Edit(FieldId, String),
    Advance,
    Retreat,
    Reset,
    Submit,
    GateResolved {
        generation: u64,
        outcome: GateOutcome,
    },
}

/// Completion of an asynchronous gate, fed back by the driver.
#[derive(Debug, Clone)]
pub enum GateOutcome {
    WalletExists(Result<(), GatewayFailure>),
    Lookup(Result<LookupPayload, GatewayFailure>),
    Overwrite(Result<(), GatewayFailure>),
}

/// Side effects requested by a transition. The machine never performs I/O
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    VerifyWallet { generation: u64, address: String },
    LookupWallet { generation: u64, phrase: String },
    OverwritePassword {
        generation: u64,
        phrase: String,
        wallet_address: String,
        new_password: String,
    },
    /// Fire-and-forget: persist the freshly recovered wallet into the
    /// transient handoff cache.
    StoreRecoveredWallet(WalletSummary),
}

/// Owns the [`WizardState`] and is the only thing allowed to mutate it.
#[derive(Debug, Default)]
pub struct WizardStateMachine {
    state: WizardState,
    generation: u64,
    notices: Vec<Notice>,
}

impl WizardStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drains the notices accumulated since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Applies one event, returning the effect the driver must execute, if
    /// any.
    pub fn apply(&mut self, event: WizardEvent) -> Option<WizardEffect> {
        // While a gate is in flight every control is disabled; only the
        // matching resolution or an explicit reset (the user navigating
        // away) gets through.
        if self.state.pending.any()
            && !matches!(
                event,
                WizardEvent::GateResolved { .. } | WizardEvent::Reset
            )
        {
            debug!("event ignored while a gate is in flight");
            return None;
        }

        match event {
            WizardEvent::SelectMode(mode) => self.on_select_mode(mode),
            WizardEvent::SetWalletInputMode(input_mode) => {
                self.on_set_wallet_input_mode(input_mode)
            }
            WizardEvent::SelectWallet(wallet) => self.on_select_wallet(wallet),
            WizardEvent::Edit(field, value) => {
                self.state.set_field(field, value);
                None
            }
            WizardEvent::Advance => {
                if self.state.step == STEPS_PER_MODE {
                    self.on_submit()
                } else {
                    self.on_advance()
                }
            }
            WizardEvent::Submit => {
                if self.state.step == STEPS_PER_MODE {
                    self.on_submit()
                } else {
                    debug!(step = self.state.step, "submit ignored before the final step");
                    None
                }
            }
            WizardEvent::Retreat => self.on_retreat(),
            WizardEvent::Reset => self.on_reset(),
            WizardEvent::GateResolved {
                generation,
                outcome,
            } => self.on_gate_resolved(generation, outcome),
        }
    }

    fn on_select_mode(&mut self, mode: RecoveryMode) -> Option<WizardEffect> {
        if self.state.mode != RecoveryMode::Unselected || mode == RecoveryMode::Unselected {
            debug!("mode selection is only valid on the mode-select screen");
            return None;
        }
        self.state.mode = mode;
        self.state.total_steps = STEPS_PER_MODE;
        self.state.step = 1;
        debug!(?mode, "recovery mode selected");
        None
    }

    fn on_set_wallet_input_mode(&mut self, input_mode: WalletInputMode) -> Option<WizardEffect> {
        if self.state.mode != RecoveryMode::KnownWallet || self.state.step != 1 {
            return None;
        }
        if self.state.wallet_input_mode != input_mode {
            self.state.wallet_input_mode = input_mode;
            self.state.field_errors.remove(&FieldId::WalletChoice);
            self.state.field_errors.remove(&FieldId::WalletAddress);
        }
        None
    }

    fn on_select_wallet(&mut self, wallet: WalletSummary) -> Option<WizardEffect> {
        if self.state.mode != RecoveryMode::KnownWallet || self.state.step != 1 {
            return None;
        }
        self.state.selected_wallet = Some(wallet);
        self.state.field_errors.remove(&FieldId::WalletChoice);
        None
    }

    fn on_advance(&mut self) -> Option<WizardEffect> {
        let state = &self.state;
        if state.mode == RecoveryMode::Unselected || state.submitted {
            return None;
        }
        if !self.run_validation() {
            return None;
        }

        match (self.state.mode, self.state.step, self.state.wallet_input_mode) {
            // Manually entered addresses are checked against the registry
            // before the wizard moves on.
            (RecoveryMode::KnownWallet, 1, WalletInputMode::Manual) => {
                let address = self.state.manual_address.trim().to_string();
                self.state.pending.verifying_wallet = true;
                Some(WizardEffect::VerifyWallet {
                    generation: self.issue_generation(),
                    address,
                })
            }
            // The phrase must derive the wallet chosen in step 1.
            (RecoveryMode::KnownWallet, 2, _) => {
                let phrase = self.state.normalized_phrase();
                self.state.pending.recovering_wallet = true;
                Some(WizardEffect::LookupWallet {
                    generation: self.issue_generation(),
                    phrase,
                })
            }
            // In ForgotWallet mode the advance out of step 1 *is* the lookup.
            (RecoveryMode::ForgotWallet, 1, _) => {
                let phrase = self.state.normalized_phrase();
                self.state.pending.recovering_wallet = true;
                Some(WizardEffect::LookupWallet {
                    generation: self.issue_generation(),
                    phrase,
                })
            }
            _ => {
                self.state.step += 1;
                debug!(step = self.state.step, "advanced");
                None
            }
        }
    }

    fn on_submit(&mut self) -> Option<WizardEffect> {
        if self.state.submitted || self.state.mode == RecoveryMode::Unselected {
            return None;
        }
        if !self.run_validation() {
            return None;
        }
        let Some(address) = self.state.target_address().map(str::to_string) else {
            warn!("submission without a target wallet address");
            return None;
        };
        self.state.pending.submitting = true;
        Some(WizardEffect::OverwritePassword {
            generation: self.issue_generation(),
            phrase: self.state.normalized_phrase(),
            wallet_address: address,
            new_password: self.state.new_password.clone(),
        })
    }

    fn on_retreat(&mut self) -> Option<WizardEffect> {
        match self.state.step {
            0 => {}
            // Going back past step 1 discards progress entirely; the two
            // modes do not share a field shape.
            1 => {
                self.generation += 1;
                self.state.clear_mode_fields();
                debug!("retreated to mode selection, fields cleared");
            }
            _ => {
                self.state.step -= 1;
                debug!(step = self.state.step, "retreated");
            }
        }
        None
    }

    fn on_reset(&mut self) -> Option<WizardEffect> {
        self.generation += 1;
        self.state.pending = Default::default();
        self.state.clear_mode_fields();
        self.notices.clear();
        debug!("wizard reset");
        None
    }

    fn on_gate_resolved(&mut self, generation: u64, outcome: GateOutcome) -> Option<WizardEffect> {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding gate outcome from a superseded request"
            );
            return None;
        }
        match outcome {
            GateOutcome::WalletExists(result) => {
                if !self.state.pending.verifying_wallet {
                    return None;
                }
                self.state.pending.verifying_wallet = false;
                match result {
                    Ok(()) => {
                        self.state.step = 2;
                        debug!("wallet address verified");
                        None
                    }
                    Err(failure) => {
                        self.attach_failure(Operation::WalletExists, &failure);
                        None
                    }
                }
            }
            GateOutcome::Lookup(result) => {
                if !self.state.pending.recovering_wallet {
                    return None;
                }
                self.state.pending.recovering_wallet = false;
                match (self.state.mode, result) {
                    (RecoveryMode::KnownWallet, Ok(payload)) => {
                        let chosen = self.state.chosen_address().unwrap_or_default();
                        if addresses_match(&payload.wallet_address, chosen) {
                            self.state.step = 3;
                            debug!("recovery phrase matches the chosen wallet");
                        } else {
                            // A mismatch is a distinct outcome from "not
                            // found" and gets its own message.
                            self.state.field_errors.insert(
                                FieldId::RecoveryPhrase,
                                taxonomy::MSG_PHRASE_WALLET_MISMATCH.to_string(),
                            );
                            self.notices.push(Notice::error(
                                taxonomy::MSG_PHRASE_WALLET_MISMATCH,
                                false,
                            ));
                            warn!("mnemonic resolves to a different wallet");
                        }
                        None
                    }
                    (RecoveryMode::ForgotWallet, Ok(payload)) => {
                        let wallet = payload.into_summary();
                        self.state.recovered_wallet = Some(wallet.clone());
                        self.state.step = 2;
                        debug!(wallet = %wallet.name, "wallet recovered from mnemonic");
                        Some(WizardEffect::StoreRecoveredWallet(wallet))
                    }
                    (_, Err(failure)) => {
                        self.attach_failure(Operation::Lookup, &failure);
                        None
                    }
                    // A lookup cannot be pending without a chosen mode.
                    (RecoveryMode::Unselected, Ok(_)) => None,
                }
            }
            GateOutcome::Overwrite(result) => {
                if !self.state.pending.submitting {
                    return None;
                }
                self.state.pending.submitting = false;
                match result {
                    Ok(()) => {
                        self.state.submitted = true;
                        self.notices
                            .push(Notice::success("Password updated. You can sign in now."));
                        debug!("password overwrite acknowledged");
                        None
                    }
                    Err(failure) => {
                        self.attach_failure(Operation::Overwrite, &failure);
                        None
                    }
                }
            }
        }
    }

    /// Runs the synchronous gate for the current step, merging any errors
    /// into the state. Returns whether the step may proceed.
    fn run_validation(&mut self) -> bool {
        let errors = validation::validate(self.state.mode, self.state.step, &self.state);
        if errors.is_empty() {
            return true;
        }
        for error in errors {
            self.state.field_errors.insert(error.field, error.message);
        }
        false
    }

    fn attach_failure(&mut self, operation: Operation, failure: &GatewayFailure) {
        let mapped = taxonomy::map_failure(operation, failure);
        warn!(?operation, kind = ?mapped.kind, "gateway call failed");
        self.notices.push(Notice::error(
            mapped.message.clone(),
            mapped.kind == ErrorKind::RateLimited,
        ));
        self.state.field_errors.insert(mapped.field, mapped.message);
    }

    fn issue_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
