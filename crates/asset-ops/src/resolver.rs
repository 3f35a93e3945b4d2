//! Reads the outcome of confirmed operations back from the ledger.

use latinum_ledger_client::LedgerClient;
use latinum_ledger_types::{AssetHolding, CreatedAsset};
use latinum_primitives::{Address, AssetId};
use tracing::*;

use crate::{
    errors::{AssetOpError, LookupKind},
    pipeline::ConfirmedTransaction,
};

/// Returns the id of the asset a confirmed creation produced.
pub fn extract_created_asset_id(confirmed: &ConfirmedTransaction) -> Result<AssetId, AssetOpError> {
    confirmed
        .asset_id
        .ok_or(AssetOpError::NotACreationTransaction(confirmed.txid))
}

/// Finds `asset_id` among the assets `creator` created.
pub async fn lookup_created_asset(
    client: &impl LedgerClient,
    creator: Address,
    asset_id: AssetId,
) -> Result<CreatedAsset, AssetOpError> {
    let info = client.account_information(creator).await?;
    info.find_created_asset(asset_id)
        .cloned()
        .ok_or_else(|| AssetOpError::not_found(LookupKind::CreatedAsset, creator, asset_id))
}

/// Finds `account`'s holding of `asset_id`.
pub async fn lookup_holding(
    client: &impl LedgerClient,
    account: Address,
    asset_id: AssetId,
) -> Result<AssetHolding, AssetOpError> {
    let info = client.account_information(account).await?;
    info.find_holding(asset_id)
        .copied()
        .ok_or_else(|| AssetOpError::not_found(LookupKind::Holding, account, asset_id))
}

fn absent_on_not_found<T>(res: Result<T, AssetOpError>) -> Result<Option<T>, AssetOpError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(AssetOpError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Looks up a created asset and logs what was found.
pub async fn report_created_asset(
    client: &impl LedgerClient,
    creator: Address,
    asset_id: AssetId,
) -> Result<Option<CreatedAsset>, AssetOpError> {
    let asset = absent_on_not_found(lookup_created_asset(client, creator, asset_id).await)?;
    match &asset {
        Some(asset) => info!(
            %asset_id,
            %creator,
            params = ?asset.params,
            "created asset"
        ),
        None => info!(%asset_id, %creator, "created asset not found"),
    }
    Ok(asset)
}

/// Looks up a holding and logs what was found.
pub async fn report_holding(
    client: &impl LedgerClient,
    account: Address,
    asset_id: AssetId,
) -> Result<Option<AssetHolding>, AssetOpError> {
    let holding = absent_on_not_found(lookup_holding(client, account, asset_id).await)?;
    match &holding {
        Some(h) => info!(
            %asset_id,
            %account,
            amount = h.amount,
            frozen = h.is_frozen,
            "asset holding"
        ),
        None => info!(%asset_id, %account, "asset holding not found"),
    }
    Ok(holding)
}
