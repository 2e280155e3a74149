//! Interactive front end for the recovery wizard. Every prompt maps to one
//! wizard event; no recovery logic lives here.

pub mod output;

use std::sync::Arc;
use std::thread;

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::errors::CliError;
use crate::storage::WalletStore;
use crate::wizard::{
    FieldId, RecoveryMode, RecoverySession, SubmitOutcome, WalletInputMode, WizardEvent,
};

const BACK_KEYWORD: &str = "back";

/// Runs the wizard loop until the user quits or recovery completes.
pub fn run(mut session: RecoverySession, wallets: Arc<dyn WalletStore>) -> Result<(), CliError> {
    output::section("Wallet recovery");
    loop {
        render_feedback(&mut session);
        let (mode, step) = {
            let state = session.state();
            (state.mode, state.step)
        };
        match (mode, step) {
            (RecoveryMode::Unselected, _) => {
                if step_mode_select(&mut session)? {
                    return Ok(());
                }
            }
            (RecoveryMode::KnownWallet, 1) => step_wallet_choice(&mut session, wallets.as_ref())?,
            (RecoveryMode::KnownWallet, 2) | (RecoveryMode::ForgotWallet, 1) => {
                step_phrase(&mut session)?
            }
            (RecoveryMode::ForgotWallet, 2) => step_confirm_recovered(&mut session)?,
            (_, 3) => {
                if step_passwords(&mut session)? {
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }
    }
}

fn render_feedback(session: &mut RecoverySession) {
    for notice in session.take_notices() {
        let visible_for = session.notice_duration(&notice);
        output::notice(&notice, visible_for);
    }
    for (field, message) in &session.state().field_errors {
        output::field_error(*field, message);
    }
}

/// Returns true when the user chose to quit.
fn step_mode_select(session: &mut RecoverySession) -> Result<bool, CliError> {
    let items = [
        "I know which wallet to recover",
        "I don't remember which wallet is mine",
        "Quit",
    ];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("How do you want to recover access?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    match choice {
        0 => session.dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet)),
        1 => session.dispatch(WizardEvent::SelectMode(RecoveryMode::ForgotWallet)),
        _ => return Ok(true),
    }
    Ok(false)
}

fn step_wallet_choice(
    session: &mut RecoverySession,
    wallets: &dyn WalletStore,
) -> Result<(), CliError> {
    output::section("Step 1 of 3 — Choose your wallet");
    let records = wallets.list()?;
    let mut items: Vec<String> = records
        .iter()
        .map(|record| format!("{} ({})", record.name, record.address))
        .collect();
    items.push("Enter the wallet address manually".into());
    items.push("← Back".into());

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which wallet are you recovering?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if choice < records.len() {
        session.dispatch(WizardEvent::SetWalletInputMode(WalletInputMode::Select));
        session.dispatch(WizardEvent::SelectWallet(records[choice].summary()));
        session.dispatch(WizardEvent::Advance);
    } else if choice == records.len() {
        session.dispatch(WizardEvent::SetWalletInputMode(WalletInputMode::Manual));
        let address: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Wallet address")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;
        session.dispatch(WizardEvent::Edit(FieldId::WalletAddress, address));
        session.dispatch(WizardEvent::Advance);
    } else {
        session.dispatch(WizardEvent::Retreat);
    }
    Ok(())
}

fn step_phrase(session: &mut RecoverySession) -> Result<(), CliError> {
    let step = session.state().step;
    output::section(&format!("Step {step} of 3 — Recovery phrase"));
    output::info("Enter the 12 words separated by spaces, or 'back' to go back.");
    let phrase: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Recovery phrase")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    if phrase.trim().eq_ignore_ascii_case(BACK_KEYWORD) {
        session.dispatch(WizardEvent::Retreat);
        return Ok(());
    }
    session.dispatch(WizardEvent::Edit(FieldId::RecoveryPhrase, phrase));
    session.dispatch(WizardEvent::Advance);
    // Let the "wallet found" moment land before the next step renders; the
    // machine has already advanced.
    if session.state().mode == RecoveryMode::ForgotWallet && session.state().step == 2 {
        thread::sleep(session.auto_advance_delay());
    }
    Ok(())
}

fn step_confirm_recovered(session: &mut RecoverySession) -> Result<(), CliError> {
    output::section("Step 2 of 3 — Wallet found");
    if let Some(wallet) = &session.state().recovered_wallet {
        output::success(&format!("Recovered wallet: {} ({})", wallet.name, wallet.address));
        if let Some(created_at) = wallet.created_at {
            output::info(&format!("Created {}", created_at.format("%Y-%m-%d")));
        }
    }
    let items = ["Continue", "← Back"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Is this your wallet?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    if choice == 0 {
        session.dispatch(WizardEvent::Advance);
    } else {
        session.dispatch(WizardEvent::Retreat);
    }
    Ok(())
}

/// Returns true when recovery completed and the wizard should exit.
fn step_passwords(session: &mut RecoverySession) -> Result<bool, CliError> {
    output::section("Step 3 of 3 — New password");
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("New password (8+ characters)")
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_err)?;
    let confirm = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Confirm password")
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_err)?;

    session.dispatch(WizardEvent::Edit(FieldId::NewPassword, password));
    session.dispatch(WizardEvent::Edit(FieldId::ConfirmPassword, confirm));

    match session.submit() {
        SubmitOutcome::Completed { redirect_after } => {
            render_feedback(session);
            // The redirect delay is purely presentation; the machine is
            // already in its terminal state.
            thread::sleep(redirect_after);
            output::info("Taking you to sign-in.");
            Ok(true)
        }
        SubmitOutcome::Rejected => Ok(false),
    }
}

fn prompt_err(err: dialoguer::Error) -> CliError {
    CliError::Input(err.to_string())
}
