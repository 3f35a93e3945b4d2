use latinum_primitives::{Address, AssetId, Round};
use serde::{Deserialize, Serialize};

use crate::asset::{AssetHolding, CreatedAsset};

/// Account state as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountInformation {
    pub address: Address,

    /// Balance in the ledger's native unit.
    #[serde(default)]
    pub amount: u64,

    /// Holdings of assets the account has opted in to.
    #[serde(default)]
    pub assets: Vec<AssetHolding>,

    /// Assets this account created.
    #[serde(default)]
    pub created_assets: Vec<CreatedAsset>,

    #[serde(default)]
    pub round: Round,
}

impl AccountInformation {
    /// Scans the created-assets list for `asset_id`.
    pub fn find_created_asset(&self, asset_id: AssetId) -> Option<&CreatedAsset> {
        self.created_assets.iter().find(|a| a.index == asset_id)
    }

    /// Scans the holdings list for `asset_id`.
    pub fn find_holding(&self, asset_id: AssetId) -> Option<&AssetHolding> {
        self.assets.iter().find(|h| h.asset_id == asset_id)
    }
}
