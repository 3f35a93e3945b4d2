use std::{fmt, str::FromStr};

use crate::errors::ParseError;

/// Length of an asset metadata commitment.
pub const METADATA_HASH_LEN: usize = 32;

/// Commitment to off-ledger asset metadata. Always exactly 32 bytes.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MetadataHash([u8; METADATA_HASH_LEN]);

impl MetadataHash {
    pub const fn new(bytes: [u8; METADATA_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; METADATA_HASH_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for MetadataHash {
    type Error = ParseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; METADATA_HASH_LEN] =
            value.try_into().map_err(|_| ParseError::InvalidLength {
                expected: METADATA_HASH_LEN,
                actual: value.len(),
            })?;
        Ok(Self(bytes))
    }
}

/// Parses a 32-character string, taking its bytes verbatim.
impl FromStr for MetadataHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.as_bytes())
    }
}

impl fmt::Debug for MetadataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetadataHash(")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}
