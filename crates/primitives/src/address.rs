//! Ledger account addresses.

use std::{fmt, str::FromStr};

use data_encoding::BASE32_NOPAD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{errors::ParseError, hash::sha512_256};

/// Length of the public key carried by an address.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the checksum suffix appended before base32 encoding.
const CHECKSUM_LEN: usize = 4;

/// Length of the textual form of an address.
pub const ADDRESS_STR_LEN: usize = 58;

/// An account address, i.e. an ed25519 public key.
///
/// The textual form is base32 (no padding) of the key followed by the last
/// four bytes of its SHA-512/256 digest.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    /// The all-zero address, which the ledger reads as "no address".
    pub const ZERO: Address = Address([0; PUBLIC_KEY_LEN]);

    pub const fn new(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; PUBLIC_KEY_LEN]
    }

    fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let digest = sha512_256(&self.0);
        let mut out = [0; CHECKSUM_LEN];
        out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        out
    }

    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
        buf.extend_from_slice(&self.0);
        buf.extend_from_slice(&self.checksum());
        BASE32_NOPAD.encode(&buf)
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for Address {
    fn from(value: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_STR_LEN {
            return Err(ParseError::InvalidLength {
                expected: ADDRESS_STR_LEN,
                actual: s.len(),
            });
        }

        let raw = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| ParseError::InvalidBase32(e.to_string()))?;
        if raw.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
            return Err(ParseError::InvalidLength {
                expected: PUBLIC_KEY_LEN + CHECKSUM_LEN,
                actual: raw.len(),
            });
        }

        let mut key = [0; PUBLIC_KEY_LEN];
        key.copy_from_slice(&raw[..PUBLIC_KEY_LEN]);
        let addr = Address(key);
        if addr.checksum() != raw[PUBLIC_KEY_LEN..] {
            return Err(ParseError::ChecksumMismatch(s.to_owned()));
        }
        Ok(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
