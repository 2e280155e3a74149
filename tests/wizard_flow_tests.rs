mod common;

use common::{harness, harness_with_records, payload, twelve_words, Call};
use recovery_core::domain::WalletRecord;
use recovery_core::gateway::{taxonomy, GatewayFailure};
use recovery_core::storage::TransientCache;
use recovery_core::wizard::{FieldId, RecoveryMode, WalletInputMode, WizardEvent};

#[test]
fn forgot_wallet_lookup_auto_advances_with_the_recovered_wallet() {
    let mut h = harness();
    h.gateway
        .queue_lookup(Ok(payload("0xabc1234567", "Savings")));

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::ForgotWallet));
    h.session
        .dispatch(WizardEvent::Edit(FieldId::RecoveryPhrase, twelve_words()));
    h.session.dispatch(WizardEvent::Advance);

    let state = h.session.state();
    assert_eq!(state.step, 2);
    assert_eq!(
        state.recovered_wallet.as_ref().map(|w| w.name.as_str()),
        Some("Savings")
    );
    assert!(!state.pending.any());

    // The looked-up wallet is handed off through the transient cache so the
    // next surface can reuse it.
    let cached = h.cache.recovered_wallet().unwrap().unwrap();
    assert_eq!(cached.address, "0xabc1234567");
}

#[test]
fn short_manual_address_never_reaches_the_gateway() {
    let mut h = harness();
    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet));
    h.session
        .dispatch(WizardEvent::SetWalletInputMode(WalletInputMode::Manual));
    h.session
        .dispatch(WizardEvent::Edit(FieldId::WalletAddress, "0x123".into()));

    h.session.dispatch(WizardEvent::Advance);

    let state = h.session.state();
    assert_eq!(state.step, 1);
    assert!(state.field_errors.contains_key(&FieldId::WalletAddress));
    assert!(h.gateway.calls().is_empty());
}

#[test]
fn failed_existence_check_attaches_to_the_address_and_clears_the_flag() {
    let mut h = harness();
    h.gateway.queue_exists(Err(GatewayFailure::status(404)));

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet));
    h.session
        .dispatch(WizardEvent::SetWalletInputMode(WalletInputMode::Manual));
    h.session.dispatch(WizardEvent::Edit(
        FieldId::WalletAddress,
        "0xabc1234567".into(),
    ));
    h.session.dispatch(WizardEvent::Advance);

    let state = h.session.state();
    assert_eq!(state.step, 1);
    assert!(!state.pending.verifying_wallet);
    assert_eq!(
        state.field_errors.get(&FieldId::WalletAddress),
        Some(&taxonomy::MSG_ADDRESS_NOT_REGISTERED.to_string())
    );
    assert_eq!(
        h.gateway.calls(),
        vec![Call::WalletExists("0xabc1234567".into())]
    );
}

#[test]
fn network_failure_is_messaged_differently_from_not_found() {
    let mut h = harness();
    h.gateway
        .queue_exists(Err(GatewayFailure::Network("timed out".into())));

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet));
    h.session
        .dispatch(WizardEvent::SetWalletInputMode(WalletInputMode::Manual));
    h.session.dispatch(WizardEvent::Edit(
        FieldId::WalletAddress,
        "0xabc1234567".into(),
    ));
    h.session.dispatch(WizardEvent::Advance);

    assert_eq!(
        h.session.state().field_errors.get(&FieldId::WalletAddress),
        Some(&taxonomy::MSG_NETWORK.to_string())
    );
}

#[test]
fn selected_wallet_skips_the_existence_gate() {
    let record = WalletRecord::new("Savings", "0xabc1234567");
    let mut h = harness_with_records(vec![record.clone()]);

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet));
    h.session
        .dispatch(WizardEvent::SelectWallet(record.summary()));
    h.session.dispatch(WizardEvent::Advance);

    assert_eq!(h.session.state().step, 2);
    assert!(h.gateway.calls().is_empty());
}

#[test]
fn known_wallet_cannot_reach_step_three_without_a_matching_lookup() {
    let record = WalletRecord::new("Savings", "0xabc1234567");
    let mut h = harness_with_records(vec![record.clone()]);
    h.gateway
        .queue_lookup(Ok(payload("0xother9999999", "Other")));

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet));
    h.session
        .dispatch(WizardEvent::SelectWallet(record.summary()));
    h.session.dispatch(WizardEvent::Advance);
    h.session
        .dispatch(WizardEvent::Edit(FieldId::RecoveryPhrase, twelve_words()));
    h.session.dispatch(WizardEvent::Advance);

    let state = h.session.state();
    assert_eq!(state.step, 2);
    assert_eq!(
        state.field_errors.get(&FieldId::RecoveryPhrase),
        Some(&taxonomy::MSG_PHRASE_WALLET_MISMATCH.to_string())
    );

    // Correcting nothing and retrying with a matching lookup unblocks it.
    h.gateway
        .queue_lookup(Ok(payload("0xABC1234567", "Savings")));
    h.session
        .dispatch(WizardEvent::Edit(FieldId::RecoveryPhrase, twelve_words()));
    h.session.dispatch(WizardEvent::Advance);
    assert_eq!(h.session.state().step, 3);
}

#[test]
fn retreat_from_step_one_starts_over_from_a_blank_state() {
    let mut h = harness();
    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::KnownWallet));
    h.session
        .dispatch(WizardEvent::SetWalletInputMode(WalletInputMode::Manual));
    h.session
        .dispatch(WizardEvent::Edit(FieldId::WalletAddress, "0x123".into()));
    h.session.dispatch(WizardEvent::Advance); // leaves a field error

    h.session.dispatch(WizardEvent::Retreat);

    let state = h.session.state();
    assert_eq!(state.mode, RecoveryMode::Unselected);
    assert_eq!(state.step, 0);
    assert_eq!(state.total_steps, 0);
    assert!(state.manual_address.is_empty());
    assert!(state.field_errors.is_empty());

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::ForgotWallet));
    let state = h.session.state();
    assert_eq!(state.mode, RecoveryMode::ForgotWallet);
    assert_eq!(state.step, 1);
    assert!(state.recovery_phrase.is_empty());
}

#[test]
fn lookup_rate_limit_surfaces_an_extended_notice() {
    let mut h = harness();
    h.gateway.queue_lookup(Err(GatewayFailure::status(429)));

    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::ForgotWallet));
    h.session
        .dispatch(WizardEvent::Edit(FieldId::RecoveryPhrase, twelve_words()));
    h.session.dispatch(WizardEvent::Advance);

    let notices = h.session.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].extended);
    assert!(
        h.session.notice_duration(&notices[0]) > std::time::Duration::from_millis(4000),
        "rate-limit notices must outlast the default duration"
    );
}

#[test]
fn session_reset_clears_the_transient_cache() {
    let mut h = harness();
    h.gateway
        .queue_lookup(Ok(payload("0xabc1234567", "Savings")));
    h.session
        .dispatch(WizardEvent::SelectMode(RecoveryMode::ForgotWallet));
    h.session
        .dispatch(WizardEvent::Edit(FieldId::RecoveryPhrase, twelve_words()));
    h.session.dispatch(WizardEvent::Advance);
    assert!(h.cache.recovered_wallet().unwrap().is_some());

    h.session.reset();

    assert!(h.cache.recovered_wallet().unwrap().is_none());
    assert_eq!(h.session.state().mode, RecoveryMode::Unselected);
}
