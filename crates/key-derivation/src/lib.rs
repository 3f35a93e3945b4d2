//! Account resolution: the 25-word mnemonic codec and ed25519 account keys.

pub mod account;
pub mod error;
pub mod mnemonic;

pub use account::{generate_account, resolve_account, Account};
pub use error::MnemonicError;
