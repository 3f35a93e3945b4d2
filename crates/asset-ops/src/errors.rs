use std::fmt;

use latinum_key_derivation::MnemonicError;
use latinum_ledger_client::LedgerClientError;
use latinum_primitives::{Address, AssetId, TxId};
use latinum_txn::TxnError;
use thiserror::Error;

/// Which account-scoped record a lookup was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    CreatedAsset,
    Holding,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::CreatedAsset => f.write_str("created asset"),
            LookupKind::Holding => f.write_str("holding"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetOpError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] MnemonicError),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("signer {signer} is not the sender {sender}")]
    WrongSigner { sender: Address, signer: Address },

    #[error("transaction {0} did not create an asset")]
    NotACreationTransaction(TxId),

    #[error("{kind} {asset_id} not found for {address}")]
    NotFound {
        kind: LookupKind,
        asset_id: AssetId,
        address: Address,
    },

    #[error("transport: {0}")]
    Transport(String),

    #[error("ledger rejected: {0}")]
    LedgerRejected(String),

    #[error("transaction {txid} not confirmed after {rounds} rounds")]
    ConfirmationTimeout { txid: TxId, rounds: u64 },

    #[error("wait for transaction {0} cancelled")]
    Cancelled(TxId),

    #[error("encoding: {0}")]
    Encoding(String),
}

impl AssetOpError {
    pub(crate) fn not_found(kind: LookupKind, address: Address, asset_id: AssetId) -> Self {
        Self::NotFound {
            kind,
            asset_id,
            address,
        }
    }
}

impl From<LedgerClientError> for AssetOpError {
    fn from(err: LedgerClientError) -> Self {
        match err {
            LedgerClientError::Rejected { status, message } => {
                Self::LedgerRejected(format!("{status}: {message}"))
            }
            LedgerClientError::Transport(msg) => Self::Transport(msg),
            LedgerClientError::Decode(msg) => Self::Transport(format!("bad response: {msg}")),
        }
    }
}

impl From<TxnError> for AssetOpError {
    fn from(err: TxnError) -> Self {
        match err {
            TxnError::WrongSigner { sender, signer } => Self::WrongSigner { sender, signer },
            TxnError::Encode(msg) | TxnError::Decode(msg) => Self::Encoding(msg),
            TxnError::BadSignature => Self::Encoding("signature does not verify".to_owned()),
        }
    }
}
