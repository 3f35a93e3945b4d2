//! Identifiers and small value types shared by every latinum crate.

#[macro_use]
mod macros;

pub mod address;
pub mod asset;
pub mod errors;
pub mod hash;
pub mod ids;

pub use address::Address;
pub use asset::MetadataHash;
pub use errors::ParseError;
pub use ids::{AssetId, Round, TxId};
