//! Confirmation wait integration tests
//!
//! The wait is bounded by default and can only be ended early through the
//! cancellation token.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use integration_tests::harness::{latinum_spec, TestNet};
use latinum_asset_ops::{AssetOpError, ConfirmationPolicy};
use latinum_primitives::Round;
use latinum_test_utils_ledger::ConfirmMode;
use tokio_util::sync::CancellationToken;

/// A transaction that never confirms times out after the configured rounds.
#[tokio::test]
async fn test_bounded_wait_times_out() {
    let net = TestNet::with_mode(ConfirmMode::Never);
    let service = net
        .service()
        .with_confirmation_policy(ConfirmationPolicy::bounded(5));
    let start = net.ledger.round();

    let err = net.create_latinum(&service).await.unwrap_err();

    let err = err.downcast::<AssetOpError>().unwrap();
    assert!(
        matches!(err, AssetOpError::ConfirmationTimeout { rounds: 5, .. }),
        "unexpected error {err:?}"
    );
    assert_eq!(net.ledger.pending_count(), 1);
    assert!(net.ledger.round() > start);
}

/// Without a bound only cancellation ends the wait.
#[tokio::test]
async fn test_unbounded_wait_ends_on_cancel() {
    let net = TestNet::with_mode(ConfirmMode::Never);
    let cancel = CancellationToken::new();
    let service = net
        .service()
        .with_confirmation_policy(ConfirmationPolicy::unbounded())
        .with_cancellation(cancel.clone());

    // Well past the default bound of 1000 rounds.
    let stop_at = Round::new(net.ledger.round().get() + 2500);
    let ledger = net.ledger.clone();
    let canceller = tokio::spawn(async move {
        while ledger.round() < stop_at {
            tokio::task::yield_now().await;
        }
        cancel.cancel();
    });

    let err = service
        .create_asset(&net.account1, net.account2.address(), latinum_spec())
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(
        matches!(err, AssetOpError::Cancelled(_)),
        "unexpected error {err:?}"
    );
    assert!(net.ledger.round() >= stop_at);
}

/// A wait that is already cancelled returns before polling, leaving the
/// submitted transaction in the pool.
#[tokio::test]
async fn test_cancelled_before_wait() {
    let net = TestNet::new();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let service = net.service().with_cancellation(cancel);

    let err = service
        .create_asset(&net.account1, net.account2.address(), latinum_spec())
        .await
        .unwrap_err();

    assert!(matches!(err, AssetOpError::Cancelled(_)));
    assert_eq!(net.ledger.pending_count(), 1);
}

/// Confirmation arriving late, but within the bound, succeeds.
#[tokio::test]
async fn test_late_confirmation_within_bound() {
    let net = TestNet::with_mode(ConfirmMode::Never);
    let service = net
        .service()
        .with_confirmation_policy(ConfirmationPolicy::bounded(100));

    let resume_at = Round::new(net.ledger.round().get() + 20);
    let ledger = net.ledger.clone();
    let resumer = tokio::spawn(async move {
        while ledger.round() < resume_at {
            tokio::task::yield_now().await;
        }
        ledger.set_mode(ConfirmMode::NextRound);
    });

    let asset_id = net.create_latinum(&service).await.unwrap();
    resumer.await.unwrap();

    assert!(!asset_id.is_zero());
    assert_eq!(net.ledger.pending_count(), 0);
}
