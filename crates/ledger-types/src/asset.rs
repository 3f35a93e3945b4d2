use latinum_primitives::{Address, AssetId, MetadataHash};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::b64_metadata_hash;

/// The immutable description of an asset, fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetSpec {
    /// Total issuance, in base units.
    pub total: u64,

    /// Digits after the decimal point when displaying amounts.
    #[serde(default)]
    pub decimals: u32,

    /// Whether new holdings start frozen.
    #[serde(default)]
    pub default_frozen: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(
        default,
        with = "b64_metadata_hash",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata_hash: Option<MetadataHash>,
}

/// The four privileged addresses of an asset. These are the only asset
/// fields that can change after creation, and only the manager can change
/// them. An absent role is disabled for good.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRoles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clawback: Option<Address>,
}

impl ControlRoles {
    /// Gives every role to one address.
    pub fn all(address: Address) -> Self {
        Self {
            manager: Some(address),
            reserve: Some(address),
            freeze: Some(address),
            clawback: Some(address),
        }
    }

    /// Fills any absent reserve, freeze or clawback role with the manager.
    pub fn inherit_from_manager(self) -> Self {
        Self {
            manager: self.manager,
            reserve: self.reserve.or(self.manager),
            freeze: self.freeze.or(self.manager),
            clawback: self.clawback.or(self.manager),
        }
    }
}

/// Asset parameters as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParameters {
    pub creator: Address,

    #[serde(flatten)]
    pub spec: AssetSpec,

    #[serde(flatten)]
    pub roles: ControlRoles,
}

/// An entry of an account's created-assets list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAsset {
    pub index: AssetId,
    pub params: AssetParameters,
}

/// An account's holding of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetHolding {
    pub asset_id: AssetId,

    pub amount: u64,

    #[serde(default)]
    pub is_frozen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherit_from_manager_keeps_explicit_roles() {
        let manager = Address::new([1; 32]);
        let reserve = Address::new([2; 32]);
        let roles = ControlRoles {
            manager: Some(manager),
            reserve: Some(reserve),
            ..Default::default()
        }
        .inherit_from_manager();

        assert_eq!(roles.reserve, Some(reserve));
        assert_eq!(roles.freeze, Some(manager));
        assert_eq!(roles.clawback, Some(manager));
    }

    #[test]
    fn test_parses_created_asset() {
        let creator = Address::new([4; 32]);
        let json = format!(
            r#"{{
                "index": 27,
                "params": {{
                    "creator": "{creator}",
                    "manager": "{creator}",
                    "decimals": 0,
                    "default-frozen": false,
                    "metadata-hash": "MTZlZmFhMzkyNGE2ZmQ5ZDNhNDgyNDc5OWE0YWM2NWQ=",
                    "name": "latinum",
                    "name-b64": "bGF0aW51bQ==",
                    "total": 1000,
                    "unit-name": "LATINUM",
                    "url": "http://someurl"
                }}
            }}"#
        );
        let asset: CreatedAsset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset.index, AssetId::new(27));
        assert_eq!(asset.params.spec.asset_name.as_deref(), Some("latinum"));
        assert_eq!(asset.params.spec.total, 1000);
        assert_eq!(
            asset.params.spec.metadata_hash,
            Some("16efaa3924a6fd9d3a4824799a4ac65d".parse().unwrap())
        );
        assert_eq!(asset.params.roles.manager, Some(creator));
        assert_eq!(asset.params.roles.freeze, None);
    }
}
