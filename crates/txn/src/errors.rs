use std::fmt;

use latinum_primitives::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxnError {
    #[error("signer {signer} is not the sender {sender}")]
    WrongSigner { sender: Address, signer: Address },

    #[error("msgpack: {0}")]
    Encode(String),

    #[error("malformed transaction: {0}")]
    Decode(String),

    #[error("signature does not verify")]
    BadSignature,
}

impl TxnError {
    pub(crate) fn encode(e: impl fmt::Display) -> Self {
        Self::Encode(e.to_string())
    }

    pub(crate) fn decode(e: impl fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }
}
