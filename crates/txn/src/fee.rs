//! Fee estimation from the node's suggested per-byte rate.

use crate::{errors::TxnError, transaction::Transaction};

/// Bytes a signature adds to the unsigned encoding, counted when sizing the
/// fee before the transaction is signed.
pub const SIGNATURE_OVERHEAD: u64 = 75;

/// Size of the signed transaction, estimated from the unsigned encoding.
pub fn estimate_signed_size(txn: &Transaction) -> Result<u64, TxnError> {
    let len = txn.encode()?.len() as u64;
    Ok(len + SIGNATURE_OVERHEAD)
}

/// The network's suggested fee: the per-byte rate times the signed size, but
/// never below the minimum fee.
pub fn suggested_fee(per_byte_fee: u64, min_fee: u64, signed_size: u64) -> u64 {
    per_byte_fee.saturating_mul(signed_size).max(min_fee)
}
