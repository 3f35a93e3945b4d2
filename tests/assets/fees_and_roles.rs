//! Fee policy and role default integration tests
//!
//! Drives the builder and pipeline directly to exercise intent options the
//! service does not expose.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use std::sync::Arc;

use integration_tests::harness::{latinum_spec, TestNet};
use latinum_asset_ops::{
    resolver, AssetOpError, ConfirmationPolicy, CreateAsset, FeePolicy, IntentKind, OptIn,
    RoleDefaults, SubmissionPipeline, TransactionBuilder, TransactionIntent,
};
use latinum_ledger_types::ControlRoles;
use latinum_primitives::AssetId;
use latinum_test_utils_ledger::{FakeLedger, FAKE_MIN_FEE};
use latinum_txn::{estimate_signed_size, suggested_fee, Transaction};
use tokio_util::sync::CancellationToken;

fn create_intent(net: &TestNet, role_defaults: RoleDefaults) -> TransactionIntent {
    TransactionIntent::new(IntentKind::Create(CreateAsset {
        creator: net.account1.address(),
        spec: latinum_spec(),
        roles: ControlRoles {
            manager: Some(net.account2.address()),
            ..Default::default()
        },
        role_defaults,
    }))
}

fn tools(net: &TestNet) -> (TransactionBuilder<FakeLedger>, SubmissionPipeline<FakeLedger>) {
    let client = Arc::new(net.ledger.clone());
    (
        TransactionBuilder::new(client.clone()),
        SubmissionPipeline::new(client, ConfirmationPolicy::default()),
    )
}

fn expected_suggested_fee(txn: &Transaction, per_byte: u64) -> u64 {
    let mut sized = txn.clone();
    sized.header.fee = per_byte;
    suggested_fee(per_byte, FAKE_MIN_FEE, estimate_signed_size(&sized).unwrap())
}

/// With no congestion the suggested fee is the minimum.
#[tokio::test]
async fn test_suggested_fee_is_minimum_when_idle() {
    let net = TestNet::new();
    let (builder, _) = tools(&net);

    let txn = builder
        .build(&create_intent(&net, RoleDefaults::InheritFromManager))
        .await
        .unwrap();

    assert_eq!(txn.header.fee, FAKE_MIN_FEE);
}

/// Under congestion the suggestion scales with size, unless a flat fee is
/// given.
#[tokio::test]
async fn test_fee_policy_under_congestion() {
    let net = TestNet::new();
    net.ledger.set_fee_per_byte(25);
    let (builder, pipeline) = tools(&net);
    let cancel = CancellationToken::new();

    let suggested = builder
        .build(&create_intent(&net, RoleDefaults::InheritFromManager))
        .await
        .unwrap();
    assert!(suggested.header.fee > FAKE_MIN_FEE);
    assert_eq!(suggested.header.fee, expected_suggested_fee(&suggested, 25));

    let intent = create_intent(&net, RoleDefaults::InheritFromManager)
        .with_fee(FeePolicy::flat(FAKE_MIN_FEE));
    let flat = builder.build(&intent).await.unwrap();
    assert_eq!(flat.header.fee, FAKE_MIN_FEE);

    // A fixed fee without the flat flag is ignored.
    let unflagged = FeePolicy {
        fee: Some(FAKE_MIN_FEE),
        flat_fee: false,
    };
    let txn = builder
        .build(&create_intent(&net, RoleDefaults::InheritFromManager).with_fee(unflagged))
        .await
        .unwrap();
    assert_eq!(txn.header.fee, suggested.header.fee);

    // The minimum is still acceptable to the ledger.
    pipeline
        .submit_and_confirm(&net.account1, &flat, &cancel)
        .await
        .unwrap();
}

/// Explicit role defaults leave omitted roles disabled for good.
#[tokio::test]
async fn test_explicit_roles_stay_unset() {
    let net = TestNet::new();
    let (builder, pipeline) = tools(&net);
    let cancel = CancellationToken::new();

    let txn = builder
        .build(&create_intent(&net, RoleDefaults::Explicit))
        .await
        .unwrap();
    let confirmed = pipeline
        .submit_and_confirm(&net.account1, &txn, &cancel)
        .await
        .unwrap();
    let asset_id = resolver::extract_created_asset_id(&confirmed).unwrap();

    let asset = resolver::lookup_created_asset(&net.ledger, net.account1.address(), asset_id)
        .await
        .unwrap();
    assert_eq!(asset.params.roles.manager, Some(net.account2.address()));
    assert_eq!(asset.params.roles.freeze, None);
    assert_eq!(asset.params.roles.clawback, None);

    // Nobody can freeze an asset without a freeze account.
    let service = net.service();
    service.opt_in(asset_id, &net.account3).await.unwrap();
    let err = service
        .freeze(asset_id, &net.account2, net.account3.address())
        .await
        .unwrap_err();
    assert!(matches!(err, AssetOpError::LedgerRejected(_)));
}

/// Signing with anyone but the sender is refused before submission.
#[tokio::test]
async fn test_wrong_signer_never_reaches_ledger() {
    let net = TestNet::new();
    let (builder, pipeline) = tools(&net);
    let cancel = CancellationToken::new();

    let txn = builder
        .build(&TransactionIntent::new(IntentKind::OptIn(OptIn {
            asset_id: AssetId::new(1001),
            account: net.account3.address(),
        })))
        .await
        .unwrap();
    let err = pipeline
        .submit_and_confirm(&net.account1, &txn, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AssetOpError::WrongSigner { .. }));
    assert_eq!(net.ledger.pending_count(), 0);
}

/// Opt-in carries the asset id; a zero one is caught locally.
#[tokio::test]
async fn test_missing_asset_id() {
    let net = TestNet::new();
    let (builder, _) = tools(&net);

    let err = builder
        .build(&TransactionIntent::new(IntentKind::OptIn(OptIn {
            asset_id: Default::default(),
            account: net.account3.address(),
        })))
        .await
        .unwrap_err();

    assert!(matches!(err, AssetOpError::MissingRequiredField("asset_id")));
}
