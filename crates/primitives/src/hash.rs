//! Hashing used for addresses, transaction ids and mnemonic checksums.

use sha2::{Digest, Sha512_256};

/// Length of a SHA-512/256 digest.
pub const DIGEST_LEN: usize = 32;

/// Computes SHA-512/256 over `data`.
pub fn sha512_256(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha512_256::digest(data).into()
}

/// Computes SHA-512/256 over the concatenation of `prefix` and `data`, the
/// domain separation used for transaction ids and signatures.
pub fn sha512_256_prefixed(prefix: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha512_256::new();
    hasher.update(prefix);
    hasher.update(data);
    hasher.finalize().into()
}
