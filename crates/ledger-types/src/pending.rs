use latinum_primitives::{AssetId, Round};
use serde::{Deserialize, Serialize};

/// What the node knows about a submitted transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransactionInfo {
    /// Round the transaction was committed in, once it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_round: Option<Round>,

    /// Asset id assigned by a confirmed creation transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_index: Option<AssetId>,

    /// Non-empty when the node dropped the transaction from its pool.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pool_error: String,
}

impl PendingTransactionInfo {
    /// Returns the confirmation round if the transaction is committed.
    pub fn confirmed(&self) -> Option<Round> {
        self.confirmed_round.filter(|r| !r.is_zero())
    }

    pub fn is_rejected(&self) -> bool {
        !self.pool_error.is_empty()
    }
}
