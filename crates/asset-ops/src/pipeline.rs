//! Sign, submit and confirm.

use std::{fmt, future::Future, sync::Arc};

use latinum_ledger_client::{LedgerClient, LedgerClientError};
use latinum_ledger_types::MAX_VALID_ROUNDS;
use latinum_primitives::{AssetId, Round, TxId};
use latinum_txn::{SignedTransaction, Transaction, TxSigner};
use tokio_util::sync::CancellationToken;
use tracing::*;

use crate::errors::AssetOpError;

/// Lifecycle stage of a transaction, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Built,
    Signed,
    Submitted,
    Confirmed,
    Failed,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxStage::Built => "built",
            TxStage::Signed => "signed",
            TxStage::Submitted => "submitted",
            TxStage::Confirmed => "confirmed",
            TxStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// How long to wait for a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    max_rounds: Option<u64>,
}

impl Default for ConfirmationPolicy {
    /// Gives up once the validity window has certainly passed.
    fn default() -> Self {
        Self::bounded(MAX_VALID_ROUNDS)
    }
}

impl ConfirmationPolicy {
    pub fn bounded(max_rounds: u64) -> Self {
        Self {
            max_rounds: Some(max_rounds),
        }
    }

    /// Waits until confirmed or cancelled.
    pub fn unbounded() -> Self {
        Self { max_rounds: None }
    }

    pub fn max_rounds(&self) -> Option<u64> {
        self.max_rounds
    }
}

/// A transaction the ledger has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedTransaction {
    pub txid: TxId,
    pub confirmed_round: Round,
    /// Set when the transaction created an asset.
    pub asset_id: Option<AssetId>,
}

/// Runs `fut` unless `cancel` fires first.
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    txid: TxId,
    fut: impl Future<Output = Result<T, LedgerClientError>>,
) -> Result<T, AssetOpError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AssetOpError::Cancelled(txid)),
        res = fut => Ok(res?),
    }
}

/// Takes built transactions through signing, submission and confirmation.
#[derive(Debug)]
pub struct SubmissionPipeline<C> {
    client: Arc<C>,
    policy: ConfirmationPolicy,
}

impl<C> Clone for SubmissionPipeline<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            policy: self.policy,
        }
    }
}

impl<C: LedgerClient> SubmissionPipeline<C> {
    pub fn new(client: Arc<C>, policy: ConfirmationPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> ConfirmationPolicy {
        self.policy
    }

    /// Signs `txn`. Fails with [`AssetOpError::WrongSigner`] when `signer` is
    /// not the sender.
    pub fn sign(
        &self,
        signer: &impl TxSigner,
        txn: &Transaction,
    ) -> Result<SignedTransaction, AssetOpError> {
        let signed = signer.sign_transaction(txn)?;
        debug!(stage = %TxStage::Signed, sender = %txn.sender(), "signed transaction");
        Ok(signed)
    }

    /// Submits a signed transaction. No retry.
    pub async fn submit(&self, signed: &SignedTransaction) -> Result<TxId, AssetOpError> {
        let raw = signed.encode()?;
        let txid = self.client.send_raw_transaction(raw).await?;
        info!(stage = %TxStage::Submitted, %txid, "submitted transaction");
        Ok(txid)
    }

    /// Polls until `txid` is confirmed, waiting one round between polls.
    pub async fn await_confirmation(
        &self,
        txid: TxId,
        cancel: &CancellationToken,
    ) -> Result<ConfirmedTransaction, AssetOpError> {
        let status = until_cancelled(cancel, txid, self.client.status()).await?;
        let mut round = status.last_round;
        let mut waited = 0u64;

        loop {
            let info =
                until_cancelled(cancel, txid, self.client.pending_transaction(txid)).await?;

            if let Some(confirmed_round) = info.confirmed() {
                info!(
                    stage = %TxStage::Confirmed,
                    %txid,
                    %confirmed_round,
                    "transaction confirmed"
                );
                return Ok(ConfirmedTransaction {
                    txid,
                    confirmed_round,
                    asset_id: info.asset_index.filter(|id| !id.is_zero()),
                });
            }

            if info.is_rejected() {
                return Err(AssetOpError::LedgerRejected(info.pool_error));
            }

            if let Some(max_rounds) = self.policy.max_rounds {
                if waited >= max_rounds {
                    return Err(AssetOpError::ConfirmationTimeout {
                        txid,
                        rounds: max_rounds,
                    });
                }
            }

            round = round.next();
            trace!(%txid, %round, "waiting for round");
            until_cancelled(cancel, txid, self.client.status_after_round(round)).await?;
            waited += 1;
        }
    }

    /// Signs, submits and waits for `txn`. The first failing stage ends the
    /// run and its error is returned as is.
    #[instrument(skip_all, fields(kind = txn.kind.type_tag(), sender = %txn.sender()))]
    pub async fn submit_and_confirm(
        &self,
        signer: &impl TxSigner,
        txn: &Transaction,
        cancel: &CancellationToken,
    ) -> Result<ConfirmedTransaction, AssetOpError> {
        let res = self.run_stages(signer, txn, cancel).await;
        if let Err(err) = &res {
            warn!(stage = %TxStage::Failed, %err, "transaction failed");
        }
        res
    }

    async fn run_stages(
        &self,
        signer: &impl TxSigner,
        txn: &Transaction,
        cancel: &CancellationToken,
    ) -> Result<ConfirmedTransaction, AssetOpError> {
        let signed = self.sign(signer, txn)?;
        let txid = self.submit(&signed).await?;
        self.await_confirmation(txid, cancel).await
    }
}
