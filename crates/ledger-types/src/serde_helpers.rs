//! Base64 field adapters for byte fields the node returns as strings.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use latinum_primitives::MetadataHash;
use serde::{de, Deserialize, Deserializer, Serializer};

pub(crate) mod b64_array32 {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(v: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(v))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let raw = STANDARD
            .decode(String::deserialize(d)?)
            .map_err(de::Error::custom)?;
        raw.as_slice()
            .try_into()
            .map_err(|_| de::Error::invalid_length(raw.len(), &"32 bytes"))
    }
}

pub(crate) mod b64_metadata_hash {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(
        v: &Option<MetadataHash>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match v {
            Some(hash) => s.serialize_some(&STANDARD.encode(hash.as_bytes())),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<MetadataHash>, D::Error> {
        let Some(text) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        let raw = STANDARD.decode(text).map_err(de::Error::custom)?;
        MetadataHash::try_from(raw.as_slice())
            .map(Some)
            .map_err(de::Error::custom)
    }
}
