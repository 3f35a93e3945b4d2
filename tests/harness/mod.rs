//! A three-account network over the in-memory ledger.
//!
//! ```ignore
//! let net = TestNet::new();
//! let service = net.service();
//! let asset_id = net.create_latinum(&service).await?;
//! ```

use latinum_asset_ops::AssetService;
use latinum_key_derivation::{generate_account, Account};
use latinum_ledger_types::AssetSpec;
use latinum_primitives::{AssetId, MetadataHash};
use latinum_test_utils_ledger::{ConfirmMode, FakeLedger};

/// The asset every scenario issues.
pub fn latinum_spec() -> AssetSpec {
    AssetSpec {
        total: 1000,
        decimals: 0,
        default_frozen: false,
        unit_name: Some("LATINUM".to_owned()),
        asset_name: Some("latinum".to_owned()),
        url: Some("http://someurl".to_owned()),
        metadata_hash: "16efaa3924a6fd9d3a4824799a4ac65d"
            .parse::<MetadataHash>()
            .ok(),
    }
}

#[derive(Debug)]
pub struct TestNet {
    pub ledger: FakeLedger,
    pub account1: Account,
    pub account2: Account,
    pub account3: Account,
}

impl Default for TestNet {
    fn default() -> Self {
        Self::new()
    }
}

impl TestNet {
    pub fn new() -> Self {
        Self::with_mode(ConfirmMode::NextRound)
    }

    pub fn with_mode(mode: ConfirmMode) -> Self {
        Self {
            ledger: FakeLedger::with_mode(mode),
            account1: generate_account(),
            account2: generate_account(),
            account3: generate_account(),
        }
    }

    /// A service over this network. Services share the ledger state.
    pub fn service(&self) -> AssetService<FakeLedger> {
        AssetService::new(self.ledger.clone())
    }

    /// account1 issues latinum managed by account2.
    pub async fn create_latinum(
        &self,
        service: &AssetService<FakeLedger>,
    ) -> anyhow::Result<AssetId> {
        let asset_id = service
            .create_asset(&self.account1, self.account2.address(), latinum_spec())
            .await?;
        Ok(asset_id)
    }
}
