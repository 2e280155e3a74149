#![doc(test(attr(deny(warnings))))]

//! Recovery Core implements the guarded multi-step wizard that restores
//! access to a wallet-backed account: mode selection, per-step validation,
//! gateway-gated transitions, and the final password overwrite.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod storage;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Recovery Core tracing initialized.");
    });
}
