//! Typed records for the data the ledger node hands back.
//!
//! Every response the orchestration reads is modelled as a struct with the
//! node's kebab-case field names mapped through serde, so no code ever pulls
//! fields out of untyped JSON by string key.

mod account;
mod asset;
mod params;
mod pending;
mod serde_helpers;
mod status;

pub use account::AccountInformation;
pub use asset::{AssetHolding, AssetParameters, AssetSpec, ControlRoles, CreatedAsset};
pub use params::{NetworkParams, MAX_VALID_ROUNDS};
pub use pending::PendingTransactionInfo;
pub use status::NodeStatus;
