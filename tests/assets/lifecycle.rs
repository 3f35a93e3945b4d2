//! Asset lifecycle integration tests
//!
//! Runs the workflows end to end against the in-memory ledger, which enforces
//! opt-in, freeze and role rules the way the real ledger does.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use integration_tests::harness::{latinum_spec, TestNet};
use latinum_asset_ops::{resolver, AssetOpError};
use latinum_ledger_types::AssetHolding;

// ============================================================================
// Creation
// ============================================================================

/// The creator holds the whole issuance, unfrozen.
#[tokio::test]
async fn test_create_gives_creator_full_issuance() {
    let net = TestNet::new();
    let service = net.service();

    let asset_id = net.create_latinum(&service).await.unwrap();

    let holding = resolver::lookup_holding(&net.ledger, net.account1.address(), asset_id)
        .await
        .unwrap();
    assert_eq!(
        holding,
        AssetHolding {
            asset_id,
            amount: 1000,
            is_frozen: false,
        }
    );

    let asset = resolver::lookup_created_asset(&net.ledger, net.account1.address(), asset_id)
        .await
        .unwrap();
    assert_eq!(asset.params.creator, net.account1.address());
    assert_eq!(asset.params.spec, latinum_spec());

    // Omitted roles went to the manager.
    let manager = Some(net.account2.address());
    assert_eq!(asset.params.roles.manager, manager);
    assert_eq!(asset.params.roles.reserve, manager);
    assert_eq!(asset.params.roles.freeze, manager);
    assert_eq!(asset.params.roles.clawback, manager);
}

/// Each creation is assigned a fresh id.
#[tokio::test]
async fn test_created_ids_are_distinct() {
    let net = TestNet::new();
    let service = net.service();

    let first = net.create_latinum(&service).await.unwrap();
    let second = net.create_latinum(&service).await.unwrap();

    assert_ne!(first, second);
}

// ============================================================================
// Opt-in and transfer
// ============================================================================

/// The ledger refuses transfers to accounts that never opted in.
#[tokio::test]
async fn test_transfer_before_opt_in_is_rejected() {
    let net = TestNet::new();
    let service = net.service();
    let asset_id = net.create_latinum(&service).await.unwrap();

    let err = service
        .transfer(asset_id, &net.account1, net.account3.address(), 10)
        .await
        .unwrap_err();

    assert!(
        matches!(err, AssetOpError::LedgerRejected(_)),
        "unexpected error {err:?}"
    );
    assert!(resolver::report_holding(&net.ledger, net.account3.address(), asset_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_opt_in_then_transfer() {
    let net = TestNet::new();
    let service = net.service();
    let asset_id = net.create_latinum(&service).await.unwrap();

    let holding = service.opt_in(asset_id, &net.account3).await.unwrap();
    assert_eq!(holding.map(|h| h.amount), Some(0));

    let holding = service
        .transfer(asset_id, &net.account1, net.account3.address(), 10)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(holding.amount, 10);
    assert!(!holding.is_frozen);

    let creator = resolver::lookup_holding(&net.ledger, net.account1.address(), asset_id)
        .await
        .unwrap();
    assert_eq!(creator.amount, 990);
}

// ============================================================================
// The full scenario
// ============================================================================

/// create -> hand over management -> opt in -> transfer -> freeze -> unfreeze
#[tokio::test]
async fn test_full_lifecycle() {
    let net = TestNet::new();
    let service = net.service();

    let asset_id = net.create_latinum(&service).await.unwrap();

    // account2 hands management to account1 and keeps the freeze role.
    service
        .configure_asset(asset_id, &net.account2, net.account1.address())
        .await
        .unwrap();
    let asset = resolver::lookup_created_asset(&net.ledger, net.account1.address(), asset_id)
        .await
        .unwrap();
    assert_eq!(asset.params.roles.manager, Some(net.account1.address()));
    assert_eq!(asset.params.roles.freeze, Some(net.account2.address()));

    // The old manager can no longer reconfigure.
    let err = service
        .configure_asset(asset_id, &net.account2, net.account2.address())
        .await
        .unwrap_err();
    assert!(matches!(err, AssetOpError::LedgerRejected(_)));

    service.opt_in(asset_id, &net.account3).await.unwrap();
    service
        .transfer(asset_id, &net.account1, net.account3.address(), 10)
        .await
        .unwrap();

    let holding = service
        .freeze(asset_id, &net.account2, net.account3.address())
        .await
        .unwrap()
        .unwrap();
    assert!(holding.is_frozen);
    assert_eq!(holding.amount, 10);

    // A frozen holding cannot send.
    let err = service
        .transfer(asset_id, &net.account3, net.account1.address(), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AssetOpError::LedgerRejected(_)));

    let holding = service
        .unfreeze(asset_id, &net.account2, net.account3.address())
        .await
        .unwrap()
        .unwrap();
    assert!(!holding.is_frozen);

    service
        .transfer(asset_id, &net.account3, net.account1.address(), 1)
        .await
        .unwrap();
    let holding = resolver::lookup_holding(&net.ledger, net.account3.address(), asset_id)
        .await
        .unwrap();
    assert_eq!(holding.amount, 9);
}

/// Only the freeze account may freeze.
#[tokio::test]
async fn test_freeze_requires_freeze_role() {
    let net = TestNet::new();
    let service = net.service();
    let asset_id = net.create_latinum(&service).await.unwrap();
    service.opt_in(asset_id, &net.account3).await.unwrap();

    let err = service
        .freeze(asset_id, &net.account1, net.account3.address())
        .await
        .unwrap_err();

    assert!(matches!(err, AssetOpError::LedgerRejected(_)));
}

/// Lookups of things that do not exist report absence.
#[tokio::test]
async fn test_lookup_missing() {
    let net = TestNet::new();
    let service = net.service();
    let asset_id = net.create_latinum(&service).await.unwrap();

    let err = resolver::lookup_created_asset(&net.ledger, net.account2.address(), asset_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AssetOpError::NotFound { .. }));

    let err = resolver::lookup_holding(&net.ledger, net.account3.address(), asset_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AssetOpError::NotFound { .. }));
}
