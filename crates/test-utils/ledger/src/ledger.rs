use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use latinum_ledger_client::{LedgerClient, LedgerClientError};
use latinum_ledger_types::{AccountInformation, NetworkParams, NodeStatus, PendingTransactionInfo};
use latinum_primitives::{Address, AssetId, Round, TxId};
use latinum_txn::{SignedTransaction, Transaction};
use tracing::*;

use crate::state::ChainState;

pub const FAKE_GENESIS_ID: &str = "fakenet-v1";
pub const FAKE_MIN_FEE: u64 = 1000;
const FAKE_GENESIS_HASH: [u8; 32] = [0x4c; 32];
const FIRST_ROUND: u64 = 1000;
const FIRST_ASSET_ID: u64 = 1001;

/// When accepted transactions get committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmMode {
    /// In the round after submission.
    #[default]
    NextRound,

    /// Never; rounds keep advancing but the pool is not drained.
    Never,
}

#[derive(Debug, Clone)]
enum TxState {
    Queued(Transaction),
    Committed {
        round: Round,
        asset_id: Option<AssetId>,
    },
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    round: Round,
    mode: ConfirmMode,
    fee_per_byte: u64,
    chain: ChainState,
    txns: HashMap<TxId, TxState>,
    queue: Vec<TxId>,
}

impl Inner {
    /// Produces one block, committing the queue unless confirmations are off.
    fn produce_block(&mut self) {
        self.round = self.round.next();
        if self.mode == ConfirmMode::Never {
            return;
        }

        for txid in self.queue.drain(..) {
            let Some(TxState::Queued(txn)) = self.txns.get(&txid).cloned() else {
                continue;
            };
            let state = match self.chain.apply(&txn) {
                Ok(asset_id) => TxState::Committed {
                    round: self.round,
                    asset_id,
                },
                Err(reason) => TxState::Failed(reason),
            };
            trace!(%txid, round = %self.round, ?state, "fake ledger committed");
            self.txns.insert(txid, state);
        }
    }

    /// State as it will be once everything queued is committed.
    fn projected_chain(&self) -> ChainState {
        let mut chain = self.chain.clone();
        for txid in &self.queue {
            if let Some(TxState::Queued(txn)) = self.txns.get(txid) {
                let _ = chain.apply(txn);
            }
        }
        chain
    }

    fn accept(&mut self, raw: &[u8]) -> Result<TxId, String> {
        let signed = SignedTransaction::decode(raw).map_err(|e| e.to_string())?;
        if signed.encode().map_err(|e| e.to_string())? != raw {
            return Err("encoding is not canonical".to_owned());
        }
        signed.verify().map_err(|e| e.to_string())?;

        let txn = signed.transaction();
        let txid = signed.txid().map_err(|e| e.to_string())?;
        if self.txns.contains_key(&txid) {
            return Err(format!("transaction {txid} already in ledger"));
        }

        let header = &txn.header;
        if header.genesis_id != FAKE_GENESIS_ID || header.genesis_hash != FAKE_GENESIS_HASH {
            return Err("wrong genesis".to_owned());
        }
        let next = self.round.next();
        if next < header.first_valid || next > header.last_valid {
            return Err(format!(
                "txn dead: round {next} outside [{}--{}]",
                header.first_valid, header.last_valid
            ));
        }
        if header.fee < FAKE_MIN_FEE {
            return Err(format!("fee {} below minimum {FAKE_MIN_FEE}", header.fee));
        }

        self.projected_chain().apply(txn)?;

        self.txns.insert(txid, TxState::Queued(txn.clone()));
        self.queue.push(txid);
        Ok(txid)
    }

    fn status(&self) -> NodeStatus {
        NodeStatus {
            last_round: self.round,
            ..Default::default()
        }
    }
}

/// A simulated ledger node. Clones share the same chain.
#[derive(Debug, Clone)]
pub struct FakeLedger {
    inner: Arc<Mutex<Inner>>,
}

impl Default for FakeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::with_mode(ConfirmMode::default())
    }

    pub fn with_mode(mode: ConfirmMode) -> Self {
        let inner = Inner {
            round: Round::new(FIRST_ROUND),
            mode,
            fee_per_byte: 0,
            chain: ChainState::new(FIRST_ASSET_ID),
            txns: HashMap::new(),
            queue: Vec::new(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_mode(&self, mode: ConfirmMode) {
        self.lock().mode = mode;
    }

    /// Sets the suggested per-byte fee, as under congestion.
    pub fn set_fee_per_byte(&self, fee: u64) {
        self.lock().fee_per_byte = fee;
    }

    pub fn round(&self) -> Round {
        self.lock().round
    }

    /// Produces `n` blocks.
    pub fn advance(&self, n: u64) {
        let mut inner = self.lock();
        for _ in 0..n {
            inner.produce_block();
        }
    }

    /// Number of accepted transactions not yet committed.
    pub fn pending_count(&self) -> usize {
        self.lock().queue.len()
    }
}

fn rejected(reason: String) -> LedgerClientError {
    LedgerClientError::rejected(400, format!("TransactionPool.Remember: {reason}"))
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn transaction_params(&self) -> Result<NetworkParams, LedgerClientError> {
        let inner = self.lock();
        Ok(NetworkParams {
            consensus_version: "fake".to_owned(),
            fee: inner.fee_per_byte,
            min_fee: FAKE_MIN_FEE,
            genesis_hash: FAKE_GENESIS_HASH,
            genesis_id: FAKE_GENESIS_ID.to_owned(),
            last_round: inner.round,
        })
    }

    async fn send_raw_transaction(&self, raw: Vec<u8>) -> Result<TxId, LedgerClientError> {
        let res = self.lock().accept(&raw);
        match res {
            Ok(txid) => {
                debug!(%txid, "fake ledger accepted transaction");
                Ok(txid)
            }
            Err(reason) => {
                debug!(%reason, "fake ledger rejected transaction");
                Err(rejected(reason))
            }
        }
    }

    async fn pending_transaction(
        &self,
        txid: TxId,
    ) -> Result<PendingTransactionInfo, LedgerClientError> {
        let inner = self.lock();
        let info = match inner.txns.get(&txid) {
            None => {
                return Err(LedgerClientError::rejected(404, "txn does not exist"));
            }
            Some(TxState::Queued(_)) => PendingTransactionInfo::default(),
            Some(TxState::Committed { round, asset_id }) => PendingTransactionInfo {
                confirmed_round: Some(*round),
                asset_index: *asset_id,
                ..Default::default()
            },
            Some(TxState::Failed(reason)) => PendingTransactionInfo {
                pool_error: reason.clone(),
                ..Default::default()
            },
        };
        Ok(info)
    }

    async fn account_information(
        &self,
        address: Address,
    ) -> Result<AccountInformation, LedgerClientError> {
        let inner = self.lock();
        Ok(inner.chain.account(address, inner.round))
    }

    async fn status(&self) -> Result<NodeStatus, LedgerClientError> {
        Ok(self.lock().status())
    }

    async fn status_after_round(&self, round: Round) -> Result<NodeStatus, LedgerClientError> {
        let status = {
            let mut inner = self.lock();
            while inner.round <= round {
                inner.produce_block();
            }
            inner.status()
        };
        // Lets other tasks, such as a canceller, run between blocks.
        tokio::task::yield_now().await;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use latinum_key_derivation::Account;
    use latinum_ledger_types::{AssetSpec, ControlRoles};
    use latinum_txn::{
        AssetConfig, AssetConfigParams, AssetFreeze, AssetTransfer, TxHeader, TxKind, TxSigner,
    };

    use super::*;

    fn header(ledger: &FakeLedger, sender: Address) -> TxHeader {
        let round = ledger.round();
        TxHeader {
            sender,
            fee: FAKE_MIN_FEE,
            first_valid: round,
            last_valid: round.saturating_add(1000),
            genesis_id: FAKE_GENESIS_ID.to_owned(),
            genesis_hash: FAKE_GENESIS_HASH,
            note: Vec::new(),
        }
    }

    async fn submit(
        ledger: &FakeLedger,
        signer: &Account,
        kind: TxKind,
    ) -> Result<TxId, LedgerClientError> {
        let txn = Transaction::new(header(ledger, signer.address()), kind);
        let raw = signer.sign_transaction(&txn).unwrap().encode().unwrap();
        ledger.send_raw_transaction(raw).await
    }

    fn create(manager: Address) -> TxKind {
        TxKind::AssetConfig(AssetConfig {
            asset_id: AssetId::default(),
            params: AssetConfigParams {
                spec: AssetSpec {
                    total: 1000,
                    ..Default::default()
                },
                roles: ControlRoles::all(manager),
            },
        })
    }

    fn xfer(asset_id: AssetId, receiver: Address, amount: u64) -> TxKind {
        TxKind::AssetTransfer(AssetTransfer {
            asset_id,
            amount,
            receiver,
            revocation_target: None,
            close_to: None,
        })
    }

    async fn create_committed(ledger: &FakeLedger, creator: &Account) -> AssetId {
        let txid = submit(ledger, creator, create(creator.address())).await.unwrap();
        ledger.advance(1);
        let info = ledger.pending_transaction(txid).await.unwrap();
        info.asset_index.unwrap()
    }

    #[tokio::test]
    async fn test_creation_commits_next_round() {
        let ledger = FakeLedger::new();
        let creator = Account::from_seed(&[1; 32]);
        let txid = submit(&ledger, &creator, create(creator.address())).await.unwrap();

        let info = ledger.pending_transaction(txid).await.unwrap();
        assert_eq!(info.confirmed(), None);

        ledger.advance(1);
        let info = ledger.pending_transaction(txid).await.unwrap();
        assert_eq!(info.confirmed(), Some(Round::new(FIRST_ROUND + 1)));
        let asset_id = info.asset_index.unwrap();

        let account = ledger.account_information(creator.address()).await.unwrap();
        assert_eq!(account.find_holding(asset_id).unwrap().amount, 1000);
        assert!(account.find_created_asset(asset_id).is_some());
    }

    #[tokio::test]
    async fn test_transfer_needs_opt_in() {
        let ledger = FakeLedger::new();
        let creator = Account::from_seed(&[1; 32]);
        let holder = Account::from_seed(&[2; 32]);
        let asset_id = create_committed(&ledger, &creator).await;

        let err = submit(&ledger, &creator, xfer(asset_id, holder.address(), 10))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerClientError::Rejected { status: 400, .. }));

        submit(&ledger, &holder, xfer(asset_id, holder.address(), 0))
            .await
            .unwrap();
        // the opt-in is still queued but counts towards validation
        submit(&ledger, &creator, xfer(asset_id, holder.address(), 10))
            .await
            .unwrap();
        ledger.advance(1);

        let account = ledger.account_information(holder.address()).await.unwrap();
        assert_eq!(account.find_holding(asset_id).unwrap().amount, 10);
    }

    #[tokio::test]
    async fn test_frozen_holding_cannot_send() {
        let ledger = FakeLedger::new();
        let creator = Account::from_seed(&[1; 32]);
        let holder = Account::from_seed(&[2; 32]);
        let asset_id = create_committed(&ledger, &creator).await;

        submit(&ledger, &holder, xfer(asset_id, holder.address(), 0)).await.unwrap();
        submit(&ledger, &creator, xfer(asset_id, holder.address(), 10)).await.unwrap();
        let freeze = TxKind::AssetFreeze(AssetFreeze {
            asset_id,
            target: holder.address(),
            frozen: true,
        });
        submit(&ledger, &creator, freeze).await.unwrap();
        ledger.advance(1);

        let err = submit(&ledger, &holder, xfer(asset_id, creator.address(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerClientError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_freeze_needs_freeze_role() {
        let ledger = FakeLedger::new();
        let creator = Account::from_seed(&[1; 32]);
        let other = Account::from_seed(&[2; 32]);
        let asset_id = create_committed(&ledger, &creator).await;

        let freeze = TxKind::AssetFreeze(AssetFreeze {
            asset_id,
            target: creator.address(),
            frozen: true,
        });
        assert!(submit(&ledger, &other, freeze).await.is_err());
    }

    #[tokio::test]
    async fn test_never_mode_keeps_transactions_pending() {
        let ledger = FakeLedger::with_mode(ConfirmMode::Never);
        let creator = Account::from_seed(&[1; 32]);
        let txid = submit(&ledger, &creator, create(creator.address())).await.unwrap();

        ledger.status_after_round(ledger.round().saturating_add(50)).await.unwrap();
        let info = ledger.pending_transaction(txid).await.unwrap();
        assert_eq!(info.confirmed(), None);
        assert_eq!(ledger.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_tampered_bytes_rejected() {
        let ledger = FakeLedger::new();
        let creator = Account::from_seed(&[1; 32]);
        let txn = Transaction::new(header(&ledger, creator.address()), create(creator.address()));
        let mut raw = creator.sign_transaction(&txn).unwrap().encode().unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        assert!(ledger.send_raw_transaction(raw).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_txid_is_not_found() {
        let ledger = FakeLedger::new();
        let err = ledger.pending_transaction(TxId::new([9; 32])).await.unwrap_err();
        assert!(matches!(err, LedgerClientError::Rejected { status: 404, .. }));
    }
}
