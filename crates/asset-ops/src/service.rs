//! The asset workflows: create, reconfigure, opt in, transfer, freeze.

use std::sync::Arc;

use latinum_key_derivation::{resolve_account, Account};
use latinum_ledger_client::LedgerClient;
use latinum_ledger_types::{AssetHolding, AssetSpec, ControlRoles};
use latinum_primitives::{Address, AssetId};
use latinum_txn::TxSigner;
use tokio_util::sync::CancellationToken;
use tracing::*;

use crate::{
    builder::{handover_roles, TransactionBuilder},
    errors::AssetOpError,
    intent::{
        CreateAsset, FeePolicy, FreezeAsset, IntentKind, OptIn, ReconfigureAsset, RoleDefaults,
        TransactionIntent, TransferAsset,
    },
    pipeline::{ConfirmationPolicy, ConfirmedTransaction, SubmissionPipeline},
    resolver,
};

/// Resolves the signing account behind a mnemonic phrase.
pub fn signer_from_mnemonic(mnemonic: &str) -> Result<Account, AssetOpError> {
    Ok(resolve_account(mnemonic)?)
}

/// Runs asset workflows against one ledger.
///
/// Every workflow builds a fresh transaction, waits for it to confirm and
/// then reports the affected record. The fee policy and note set here apply
/// to every transaction.
#[derive(Debug)]
pub struct AssetService<C> {
    client: Arc<C>,
    builder: TransactionBuilder<C>,
    pipeline: SubmissionPipeline<C>,
    fee: FeePolicy,
    note: Vec<u8>,
    cancel: CancellationToken,
}

impl<C: LedgerClient> AssetService<C> {
    pub fn new(client: C) -> Self {
        Self::from_shared(Arc::new(client))
    }

    pub fn from_shared(client: Arc<C>) -> Self {
        Self {
            builder: TransactionBuilder::new(client.clone()),
            pipeline: SubmissionPipeline::new(client.clone(), ConfirmationPolicy::default()),
            client,
            fee: FeePolicy::default(),
            note: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_fee_policy(mut self, fee: FeePolicy) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_note(mut self, note: impl Into<Vec<u8>>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_confirmation_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.pipeline = SubmissionPipeline::new(self.client.clone(), policy);
        self
    }

    /// Confirmation waits stop with [`AssetOpError::Cancelled`] once `cancel`
    /// fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    async fn execute(
        &self,
        signer: &impl TxSigner,
        kind: IntentKind,
    ) -> Result<ConfirmedTransaction, AssetOpError> {
        let intent = TransactionIntent::new(kind)
            .with_fee(self.fee)
            .with_note(self.note.clone());
        let txn = self.builder.build(&intent).await?;
        self.pipeline
            .submit_and_confirm(signer, &txn, &self.cancel)
            .await
    }

    /// Creates an asset managed by `manager`, who also takes the reserve,
    /// freeze and clawback roles. The creator receives the whole issuance.
    pub async fn create_asset(
        &self,
        creator: &impl TxSigner,
        manager: Address,
        spec: AssetSpec,
    ) -> Result<AssetId, AssetOpError> {
        let kind = IntentKind::Create(CreateAsset {
            creator: creator.address(),
            spec,
            roles: ControlRoles {
                manager: Some(manager),
                ..Default::default()
            },
            role_defaults: RoleDefaults::InheritFromManager,
        });
        let confirmed = self.execute(creator, kind).await?;
        let asset_id = resolver::extract_created_asset_id(&confirmed)?;
        info!(%asset_id, creator = %creator.address(), "asset created");

        resolver::report_created_asset(self.client(), creator.address(), asset_id).await?;
        resolver::report_holding(self.client(), creator.address(), asset_id).await?;
        Ok(asset_id)
    }

    /// Hands the manager role to `new_manager`. The signing manager keeps the
    /// reserve, freeze and clawback roles.
    pub async fn configure_asset(
        &self,
        asset_id: AssetId,
        manager: &impl TxSigner,
        new_manager: Address,
    ) -> Result<ConfirmedTransaction, AssetOpError> {
        let kind = IntentKind::Reconfigure(ReconfigureAsset {
            asset_id,
            manager: Some(manager.address()),
            roles: handover_roles(manager.address(), new_manager),
        });
        let confirmed = self.execute(manager, kind).await?;
        info!(%asset_id, %new_manager, "asset reconfigured");

        resolver::report_created_asset(self.client(), new_manager, asset_id).await?;
        Ok(confirmed)
    }

    /// Opts `account` in to `asset_id` and returns its new empty holding.
    pub async fn opt_in(
        &self,
        asset_id: AssetId,
        account: &impl TxSigner,
    ) -> Result<Option<AssetHolding>, AssetOpError> {
        let kind = IntentKind::OptIn(OptIn {
            asset_id,
            account: account.address(),
        });
        self.execute(account, kind).await?;
        info!(%asset_id, account = %account.address(), "opted in");

        resolver::report_holding(self.client(), account.address(), asset_id).await
    }

    /// Sends `amount` base units of `asset_id` and returns the recipient's
    /// holding afterwards.
    pub async fn transfer(
        &self,
        asset_id: AssetId,
        sender: &impl TxSigner,
        recipient: Address,
        amount: u64,
    ) -> Result<Option<AssetHolding>, AssetOpError> {
        let kind = IntentKind::Transfer(TransferAsset {
            asset_id,
            sender: sender.address(),
            receiver: recipient,
            amount,
            revocation_target: None,
            close_to: None,
        });
        self.execute(sender, kind).await?;
        info!(%asset_id, %recipient, amount, "transferred");

        resolver::report_holding(self.client(), recipient, asset_id).await
    }

    pub async fn freeze(
        &self,
        asset_id: AssetId,
        requestor: &impl TxSigner,
        target: Address,
    ) -> Result<Option<AssetHolding>, AssetOpError> {
        self.set_frozen(asset_id, requestor, target, true).await
    }

    pub async fn unfreeze(
        &self,
        asset_id: AssetId,
        requestor: &impl TxSigner,
        target: Address,
    ) -> Result<Option<AssetHolding>, AssetOpError> {
        self.set_frozen(asset_id, requestor, target, false).await
    }

    async fn set_frozen(
        &self,
        asset_id: AssetId,
        requestor: &impl TxSigner,
        target: Address,
        frozen: bool,
    ) -> Result<Option<AssetHolding>, AssetOpError> {
        let kind = IntentKind::Freeze(FreezeAsset {
            asset_id,
            requestor: requestor.address(),
            target: Some(target),
            frozen,
        });
        self.execute(requestor, kind).await?;
        info!(%asset_id, %target, frozen, "freeze state set");

        resolver::report_holding(self.client(), target, asset_id).await
    }
}

#[cfg(test)]
mod tests {
    use latinum_key_derivation::MnemonicError;
    use latinum_ledger_client::MockLedgerClient;
    use latinum_ledger_types::{
        AccountInformation, AssetParameters, CreatedAsset, NetworkParams, NodeStatus,
        PendingTransactionInfo,
    };
    use latinum_primitives::{Round, TxId};

    use super::*;

    fn params() -> NetworkParams {
        NetworkParams {
            consensus_version: String::new(),
            fee: 0,
            min_fee: 1000,
            genesis_hash: [7; 32],
            genesis_id: "testnet-v1.0".to_owned(),
            last_round: Round::new(10),
        }
    }

    /// A mock that confirms every submitted transaction immediately.
    fn confirming_mock(asset_index: Option<AssetId>) -> MockLedgerClient {
        let mut mock_client = MockLedgerClient::new();
        mock_client
            .expect_transaction_params()
            .returning(|| Ok(params()));
        mock_client
            .expect_send_raw_transaction()
            .times(1)
            .returning(|_| Ok(TxId::new([5; 32])));
        mock_client.expect_status().returning(|| {
            Ok(NodeStatus {
                last_round: Round::new(10),
                ..Default::default()
            })
        });
        mock_client
            .expect_pending_transaction()
            .returning(move |_| {
                Ok(PendingTransactionInfo {
                    confirmed_round: Some(Round::new(11)),
                    asset_index,
                    ..Default::default()
                })
            });
        mock_client
    }

    fn latinum() -> AssetSpec {
        AssetSpec {
            total: 1000,
            decimals: 0,
            unit_name: Some("LATINUM".to_owned()),
            asset_name: Some("latinum".to_owned()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_asset_returns_assigned_id() {
        let creator = Account::from_seed(&[1; 32]);
        let manager = Address::new([2; 32]);

        let mut mock_client = confirming_mock(Some(AssetId::new(27)));
        mock_client
            .expect_account_information()
            .times(2)
            .returning(move |a| {
                Ok(AccountInformation {
                    address: a,
                    amount: 0,
                    assets: vec![AssetHolding {
                        asset_id: AssetId::new(27),
                        amount: 1000,
                        is_frozen: false,
                    }],
                    created_assets: vec![CreatedAsset {
                        index: AssetId::new(27),
                        params: AssetParameters {
                            creator: a,
                            spec: latinum(),
                            roles: ControlRoles::all(manager),
                        },
                    }],
                    round: Round::new(11),
                })
            });

        let service = AssetService::new(mock_client);
        let asset_id = service
            .create_asset(&creator, manager, latinum())
            .await
            .unwrap();
        assert_eq!(asset_id, AssetId::new(27));
    }

    #[tokio::test]
    async fn test_create_without_asset_index_fails() {
        let creator = Account::from_seed(&[1; 32]);
        let service = AssetService::new(confirming_mock(None));
        let err = service
            .create_asset(&creator, Address::new([2; 32]), latinum())
            .await
            .unwrap_err();
        assert!(matches!(err, AssetOpError::NotACreationTransaction(_)));
    }

    #[tokio::test]
    async fn test_opt_in_reports_missing_holding_as_none() {
        let account = Account::from_seed(&[3; 32]);
        let mut mock_client = confirming_mock(None);
        mock_client.expect_account_information().returning(|a| {
            Ok(AccountInformation {
                address: a,
                amount: 0,
                assets: vec![],
                created_assets: vec![],
                round: Round::new(11),
            })
        });

        let service = AssetService::new(mock_client).with_note(b"showing prefix".to_vec());
        let holding = service.opt_in(AssetId::new(27), &account).await.unwrap();
        assert!(holding.is_none());
    }

    #[test]
    fn test_signer_from_mnemonic() {
        let account = Account::from_seed(&[4; 32]);
        let signer = signer_from_mnemonic(&account.to_mnemonic()).unwrap();
        assert_eq!(signer.address(), account.address());

        let err = signer_from_mnemonic("abandon abandon abandon").unwrap_err();
        assert!(matches!(
            err,
            AssetOpError::InvalidMnemonic(MnemonicError::WrongWordCount { actual: 3, .. })
        ));
    }
}
