//! Turns intents into unsigned transactions.

use std::sync::Arc;

use latinum_ledger_client::LedgerClient;
use latinum_ledger_types::{AssetSpec, ControlRoles, NetworkParams};
use latinum_primitives::Address;
use latinum_txn::{
    estimate_signed_size, suggested_fee, AssetConfig, AssetConfigParams, AssetFreeze,
    AssetTransfer, Transaction, TxHeader, TxKind,
};
use tracing::*;

use crate::{
    errors::AssetOpError,
    intent::{IntentKind, RoleDefaults, TransactionIntent},
    pipeline::TxStage,
};

/// Builds the transaction for `intent` against the given network parameters.
///
/// The validity window opens at the node's last round and spans the widest
/// window the ledger accepts.
pub fn build_transaction(
    intent: &TransactionIntent,
    params: &NetworkParams,
) -> Result<Transaction, AssetOpError> {
    let (sender, kind) = build_kind(&intent.kind)?;

    let header = TxHeader {
        sender,
        // Sized with the per-byte rate in place, as the node's own estimate is.
        fee: params.fee,
        first_valid: params.first_valid(),
        last_valid: params.last_valid(),
        genesis_id: params.genesis_id.clone(),
        genesis_hash: params.genesis_hash,
        note: intent.note.clone(),
    };
    let mut txn = Transaction::new(header, kind);

    txn.header.fee = match intent.fee.fixed_fee() {
        Some(fee) => fee,
        None => suggested_fee(params.fee, params.min_fee, estimate_signed_size(&txn)?),
    };

    Ok(txn)
}

fn build_kind(kind: &IntentKind) -> Result<(Address, TxKind), AssetOpError> {
    let built = match kind {
        IntentKind::Create(create) => {
            let roles = match create.role_defaults {
                RoleDefaults::InheritFromManager => {
                    if create.roles.manager.is_none() {
                        return Err(AssetOpError::MissingRequiredField("manager"));
                    }
                    create.roles.inherit_from_manager()
                }
                RoleDefaults::Explicit => create.roles,
            };
            let cfg = AssetConfig {
                asset_id: Default::default(),
                params: AssetConfigParams {
                    spec: create.spec.clone(),
                    roles,
                },
            };
            (create.creator, TxKind::AssetConfig(cfg))
        }

        IntentKind::Reconfigure(reconf) => {
            if reconf.asset_id.is_zero() {
                return Err(AssetOpError::MissingRequiredField("asset_id"));
            }
            let manager = reconf
                .manager
                .ok_or(AssetOpError::MissingRequiredField("manager"))?;
            let cfg = AssetConfig {
                asset_id: reconf.asset_id,
                params: AssetConfigParams {
                    spec: AssetSpec::default(),
                    roles: reconf.roles,
                },
            };
            (manager, TxKind::AssetConfig(cfg))
        }

        IntentKind::OptIn(opt_in) => {
            if opt_in.asset_id.is_zero() {
                return Err(AssetOpError::MissingRequiredField("asset_id"));
            }
            let xfer = AssetTransfer {
                asset_id: opt_in.asset_id,
                amount: 0,
                receiver: opt_in.account,
                revocation_target: None,
                close_to: None,
            };
            (opt_in.account, TxKind::AssetTransfer(xfer))
        }

        IntentKind::Transfer(transfer) => {
            if transfer.asset_id.is_zero() {
                return Err(AssetOpError::MissingRequiredField("asset_id"));
            }
            let xfer = AssetTransfer {
                asset_id: transfer.asset_id,
                amount: transfer.amount,
                receiver: transfer.receiver,
                revocation_target: transfer.revocation_target,
                close_to: transfer.close_to,
            };
            (transfer.sender, TxKind::AssetTransfer(xfer))
        }

        IntentKind::Freeze(freeze) => {
            if freeze.asset_id.is_zero() {
                return Err(AssetOpError::MissingRequiredField("asset_id"));
            }
            let target = freeze
                .target
                .ok_or(AssetOpError::MissingRequiredField("freeze_target"))?;
            let frz = AssetFreeze {
                asset_id: freeze.asset_id,
                target,
                frozen: freeze.frozen,
            };
            (freeze.requestor, TxKind::AssetFreeze(frz))
        }
    };
    Ok(built)
}

/// Builds transactions with parameters fetched fresh from the node for every
/// build.
#[derive(Debug)]
pub struct TransactionBuilder<C> {
    client: Arc<C>,
}

impl<C> Clone for TransactionBuilder<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C: LedgerClient> TransactionBuilder<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn build(&self, intent: &TransactionIntent) -> Result<Transaction, AssetOpError> {
        let params = self.client.transaction_params().await?;
        let txn = build_transaction(intent, &params)?;
        debug!(
            stage = %TxStage::Built,
            kind = txn.kind.type_tag(),
            sender = %txn.sender(),
            fee = txn.header.fee,
            first_valid = %txn.header.first_valid,
            "built transaction"
        );
        Ok(txn)
    }
}

/// Roles used by a reconfiguration that hands the manager role to
/// `new_manager` while `current` keeps the others.
pub fn handover_roles(current: Address, new_manager: Address) -> ControlRoles {
    ControlRoles {
        manager: Some(new_manager),
        ..ControlRoles::all(current)
    }
}
