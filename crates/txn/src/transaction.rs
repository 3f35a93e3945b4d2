//! Unsigned asset transactions.

use latinum_ledger_types::{AssetSpec, ControlRoles};
use latinum_primitives::{hash::sha512_256_prefixed, Address, AssetId, Round, TxId};

use crate::{decode, encode, errors::TxnError};

/// Domain separator prepended to the encoding before hashing or signing.
pub(crate) const TX_DOMAIN: &[u8] = b"TX";

/// Fields shared by every transaction kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHeader {
    pub sender: Address,

    /// Fee in the ledger's native base unit.
    pub fee: u64,

    pub first_valid: Round,

    pub last_valid: Round,

    pub genesis_id: String,

    pub genesis_hash: [u8; 32],

    /// Opaque note bytes, not interpreted by the ledger.
    pub note: Vec<u8>,
}

/// Parameters carried by an asset configuration.
///
/// For a creation all fields are meaningful. For a reconfiguration the spec
/// stays empty and the roles replace the current ones wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetConfigParams {
    pub spec: AssetSpec,
    pub roles: ControlRoles,
}

/// Creates an asset (zero `asset_id`) or reconfigures an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub asset_id: AssetId,
    pub params: AssetConfigParams,
}

/// Moves units of an asset. A zero-amount transfer to oneself opts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransfer {
    pub asset_id: AssetId,
    pub amount: u64,
    pub receiver: Address,

    /// Account the units are revoked from, when the sender acts as clawback.
    pub revocation_target: Option<Address>,

    /// Account that receives the sender's remaining balance of the asset.
    pub close_to: Option<Address>,
}

/// Sets or clears the frozen flag on one holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFreeze {
    pub asset_id: AssetId,
    pub target: Address,
    pub frozen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxKind {
    AssetConfig(AssetConfig),
    AssetTransfer(AssetTransfer),
    AssetFreeze(AssetFreeze),
}

impl TxKind {
    /// Type tag the ledger uses for this kind.
    pub fn type_tag(&self) -> &'static str {
        match self {
            TxKind::AssetConfig(_) => "acfg",
            TxKind::AssetTransfer(_) => "axfer",
            TxKind::AssetFreeze(_) => "afrz",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: TxHeader,
    pub kind: TxKind,
}

impl Transaction {
    pub fn new(header: TxHeader, kind: TxKind) -> Self {
        Self { header, kind }
    }

    pub fn sender(&self) -> Address {
        self.header.sender
    }

    /// Canonical msgpack encoding of the unsigned transaction.
    pub fn encode(&self) -> Result<Vec<u8>, TxnError> {
        let mut buf = Vec::new();
        encode::write_transaction(&mut buf, self)?;
        Ok(buf)
    }

    /// Reads an unsigned transaction from its canonical encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, TxnError> {
        decode::decode_transaction(bytes)
    }

    /// Bytes covered by the sender's signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, TxnError> {
        let mut buf = TX_DOMAIN.to_vec();
        encode::write_transaction(&mut buf, self)?;
        Ok(buf)
    }

    pub fn txid(&self) -> Result<TxId, TxnError> {
        let encoded = self.encode()?;
        Ok(TxId::new(sha512_256_prefixed(TX_DOMAIN, &encoded)))
    }

    /// Returns true when this is an asset creation.
    pub fn is_asset_creation(&self) -> bool {
        matches!(&self.kind, TxKind::AssetConfig(cfg) if cfg.asset_id.is_zero())
    }
}
