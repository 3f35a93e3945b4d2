use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use latinum_primitives::TxId;

use crate::{decode, encode, errors::TxnError, transaction::Transaction};

pub const SIGNATURE_LEN: usize = 64;

/// A transaction with the sender's ed25519 signature attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: [u8; SIGNATURE_LEN],
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, signature: [u8; SIGNATURE_LEN]) -> Self {
        Self {
            transaction,
            signature,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature
    }

    /// Wire bytes accepted by the node's raw submission endpoint.
    pub fn encode(&self) -> Result<Vec<u8>, TxnError> {
        let mut buf = Vec::new();
        encode::write_signed(&mut buf, &self.signature, &self.transaction)?;
        Ok(buf)
    }

    /// Reads the wire form back.
    pub fn decode(bytes: &[u8]) -> Result<Self, TxnError> {
        decode::decode_signed(bytes)
    }

    /// Checks the signature against the sender's public key.
    pub fn verify(&self) -> Result<(), TxnError> {
        let key = VerifyingKey::from_bytes(self.transaction.sender().as_bytes())
            .map_err(|_| TxnError::BadSignature)?;
        let message = self.transaction.signing_bytes()?;
        key.verify(&message, &Signature::from_bytes(&self.signature))
            .map_err(|_| TxnError::BadSignature)
    }

    /// The id is that of the inner transaction; the signature does not
    /// affect it.
    pub fn txid(&self) -> Result<TxId, TxnError> {
        self.transaction.txid()
    }
}
