//! The guarded recovery wizard: a finite-state stepper that branches into
//! two recovery modes and gates every forward transition behind synchronous
//! validation and, where a step defines one, a gateway round trip.

pub mod machine;
pub mod notice;
pub mod state;
pub mod submit;
pub mod validation;

pub use machine::{GateOutcome, WizardEffect, WizardEvent, WizardStateMachine};
pub use notice::{Notice, NoticeSeverity};
pub use state::{FieldId, PendingFlags, RecoveryMode, WalletInputMode, WizardState};
pub use submit::{RecoverySession, SubmissionCoordinator, SubmitOutcome};
