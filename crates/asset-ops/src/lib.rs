//! Asset lifecycle orchestration.
//!
//! An operation flows strictly forward: a [`TransactionIntent`] is turned into
//! a [`Transaction`](latinum_txn::Transaction) by the [`TransactionBuilder`],
//! signed, submitted and confirmed by the [`SubmissionPipeline`], and its
//! outcome read back through the [`resolver`] functions. [`AssetService`]
//! strings these together into the asset workflows.

pub mod builder;
pub mod errors;
pub mod intent;
pub mod pipeline;
pub mod resolver;
pub mod service;

pub use builder::{build_transaction, TransactionBuilder};
pub use errors::{AssetOpError, LookupKind};
pub use intent::{
    CreateAsset, FeePolicy, FreezeAsset, IntentKind, OptIn, ReconfigureAsset, RoleDefaults,
    TransactionIntent, TransferAsset,
};
pub use pipeline::{ConfirmationPolicy, ConfirmedTransaction, SubmissionPipeline, TxStage};
pub use service::{signer_from_mnemonic, AssetService};
