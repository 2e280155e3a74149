pub mod wallet;

pub use wallet::{addresses_match, WalletRecord, WalletSummary};
