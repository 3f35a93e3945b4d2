//! Numeric and hash identifiers assigned by the ledger.

use std::{fmt, str::FromStr};

use data_encoding::BASE32_NOPAD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{errors::ParseError, hash::DIGEST_LEN};

/// Identifier of an asset, assigned by the ledger when the creation
/// transaction is confirmed. Zero means "no asset".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl_u64_wrapper!(AssetId);

impl AssetId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A ledger round number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round(u64);

impl_u64_wrapper!(Round);

impl Round {
    pub const fn new(round: u64) -> Self {
        Self(round)
    }

    /// Returns the following round.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub const fn saturating_add(self, rounds: u64) -> Self {
        Self(self.0.saturating_add(rounds))
    }
}

/// Length of the textual form of a transaction id.
pub const TXID_STR_LEN: usize = 52;

/// Transaction identifier: SHA-512/256 of the domain-separated canonical
/// encoding, displayed as unpadded base32.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxId([u8; DIGEST_LEN]);

impl TxId {
    pub const fn new(digest: [u8; DIGEST_LEN]) -> Self {
        Self(digest)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl FromStr for TxId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != TXID_STR_LEN {
            return Err(ParseError::InvalidLength {
                expected: TXID_STR_LEN,
                actual: s.len(),
            });
        }
        let raw = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| ParseError::InvalidBase32(e.to_string()))?;
        let digest: [u8; DIGEST_LEN] =
            raw.as_slice()
                .try_into()
                .map_err(|_| ParseError::InvalidLength {
                    expected: DIGEST_LEN,
                    actual: raw.len(),
                })?;
        Ok(Self(digest))
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&BASE32_NOPAD.encode(&self.0))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({self})")
    }
}

impl Serialize for TxId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
