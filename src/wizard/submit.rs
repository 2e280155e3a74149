//! Drives the wizard against the real collaborators: executes the effects
//! the reducer requests, and performs the terminal transition's local
//! reconciliation once the overwrite is acknowledged.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::gateway::RecoveryGateway;
use crate::storage::{TransientCache, WalletStore};

use super::machine::{GateOutcome, WizardEffect, WizardEvent, WizardStateMachine};
use super::notice::Notice;
use super::state::WizardState;

/// Result of driving a submission to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The overwrite was acknowledged; navigate to sign-in after the delay.
    Completed { redirect_after: Duration },
    /// Validation or the gateway rejected the attempt; the wizard stays on
    /// the final step with errors attached so the user can correct and
    /// resubmit.
    Rejected,
}

/// Local follow-up to a successful password overwrite: refresh the cached
/// password of a matching persisted wallet record (best effort, non-fatal
/// when absent) and drop the transient recovered-wallet slot.
pub struct SubmissionCoordinator {
    wallets: Arc<dyn WalletStore>,
    cache: Arc<dyn TransientCache>,
}

impl SubmissionCoordinator {
    pub fn new(wallets: Arc<dyn WalletStore>, cache: Arc<dyn TransientCache>) -> Self {
        Self { wallets, cache }
    }

    pub fn finalize(&self, wallet_address: &str, new_password: &str) {
        match self.wallets.find_by_address(wallet_address) {
            Ok(Some(record)) => match self.wallets.update_password(record.id, new_password) {
                Ok(true) => debug!(wallet = %record.name, "local password cache refreshed"),
                Ok(false) => debug!("wallet record vanished before the password refresh"),
                Err(err) => warn!(%err, "failed to refresh the local password cache"),
            },
            Ok(None) => debug!("no local wallet record matches the recovered address"),
            Err(err) => warn!(%err, "wallet store lookup failed during finalization"),
        }
        if let Err(err) = self.cache.clear_recovered_wallet() {
            warn!(%err, "failed to clear the recovered-wallet cache");
        }
    }
}

/// Owns a [`WizardStateMachine`] together with the gateway and the local
/// stores, and runs requested effects inline. The reducer stays pure; this
/// is the single place where its effects meet I/O.
pub struct RecoverySession {
    machine: WizardStateMachine,
    gateway: Arc<dyn RecoveryGateway>,
    cache: Arc<dyn TransientCache>,
    coordinator: SubmissionCoordinator,
    redirect_delay: Duration,
    auto_advance_delay: Duration,
    notice_duration: Duration,
    rate_limited_notice: Duration,
}

impl RecoverySession {
    pub fn new(
        gateway: Arc<dyn RecoveryGateway>,
        wallets: Arc<dyn WalletStore>,
        cache: Arc<dyn TransientCache>,
        config: &Config,
    ) -> Self {
        Self {
            machine: WizardStateMachine::new(),
            gateway,
            cache: cache.clone(),
            coordinator: SubmissionCoordinator::new(wallets, cache),
            redirect_delay: Duration::from_millis(config.redirect_delay_ms),
            auto_advance_delay: Duration::from_millis(config.auto_advance_delay_ms),
            notice_duration: Duration::from_millis(config.notice_duration_ms),
            rate_limited_notice: Duration::from_millis(config.rate_limited_notice_ms),
        }
    }

    pub fn state(&self) -> &WizardState {
        self.machine.state()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.machine.take_notices()
    }

    /// Pause the UI shows between a successful lookup and the next step.
    pub fn auto_advance_delay(&self) -> Duration {
        self.auto_advance_delay
    }

    /// How long a notice should stay visible.
    pub fn notice_duration(&self, notice: &Notice) -> Duration {
        if notice.extended {
            self.rate_limited_notice
        } else {
            self.notice_duration
        }
    }

    /// Feeds one event into the machine and executes whatever effects it
    /// requests, including the follow-up events their outcomes produce.
    pub fn dispatch(&mut self, event: WizardEvent) {
        let mut effect = self.machine.apply(event);
        while let Some(current) = effect.take() {
            effect = self.run_effect(current);
        }
    }

    /// Runs the terminal transition. Local re-validation, the overwrite
    /// call, and reconciliation all happen before this returns.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.dispatch(WizardEvent::Submit);
        if self.machine.state().submitted {
            SubmitOutcome::Completed {
                redirect_after: self.redirect_delay,
            }
        } else {
            SubmitOutcome::Rejected
        }
    }

    /// Abandons the wizard: resets all fields and clears the transient
    /// recovered-wallet slot.
    pub fn reset(&mut self) {
        self.dispatch(WizardEvent::Reset);
        if let Err(err) = self.cache.clear_recovered_wallet() {
            warn!(%err, "failed to clear the recovered-wallet cache on reset");
        }
    }

    fn run_effect(&mut self, effect: WizardEffect) -> Option<WizardEffect> {
        match effect {
            WizardEffect::VerifyWallet {
                generation,
                address,
            } => {
                let outcome = GateOutcome::WalletExists(self.gateway.wallet_exists(&address));
                self.machine.apply(WizardEvent::GateResolved {
                    generation,
                    outcome,
                })
            }
            WizardEffect::LookupWallet { generation, phrase } => {
                let outcome = GateOutcome::Lookup(self.gateway.lookup_by_mnemonic(&phrase));
                self.machine.apply(WizardEvent::GateResolved {
                    generation,
                    outcome,
                })
            }
            WizardEffect::OverwritePassword {
                generation,
                phrase,
                wallet_address,
                new_password,
            } => {
                let result =
                    self.gateway
                        .overwrite_password(&phrase, &wallet_address, &new_password);
                let follow_up = self.machine.apply(WizardEvent::GateResolved {
                    generation,
                    outcome: GateOutcome::Overwrite(result),
                });
                if self.machine.state().submitted {
                    self.coordinator.finalize(&wallet_address, &new_password);
                }
                follow_up
            }
            WizardEffect::StoreRecoveredWallet(wallet) => {
                if let Err(err) = self.cache.put_recovered_wallet(&wallet) {
                    warn!(%err, "failed to cache the recovered wallet");
                }
                None
            }
        }
    }
}
