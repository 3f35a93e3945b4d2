//! Asset transactions: the model, its canonical encoding, fees and signing.

mod decode;
mod encode;
mod errors;
mod fee;
mod signed;
mod signer;
mod transaction;

pub use errors::TxnError;
pub use fee::{estimate_signed_size, suggested_fee, SIGNATURE_OVERHEAD};
pub use signed::{SignedTransaction, SIGNATURE_LEN};
pub use signer::TxSigner;
pub use transaction::{
    AssetConfig, AssetConfigParams, AssetFreeze, AssetTransfer, Transaction, TxHeader, TxKind,
};
