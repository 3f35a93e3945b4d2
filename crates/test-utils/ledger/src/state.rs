//! Ledger rules for the asset transaction kinds.

use std::collections::{BTreeMap, HashMap};

use latinum_ledger_types::{
    AccountInformation, AssetHolding, AssetParameters, AssetSpec, ControlRoles, CreatedAsset,
};
use latinum_primitives::{Address, AssetId, Round};
use latinum_txn::{AssetConfig, AssetFreeze, AssetTransfer, Transaction, TxKind};

const MAX_DECIMALS: u32 = 19;
const MAX_UNIT_NAME_LEN: usize = 8;
const MAX_ASSET_NAME_LEN: usize = 32;
const MAX_URL_LEN: usize = 96;

type Rejection = String;

/// Committed asset state.
#[derive(Debug, Clone)]
pub(crate) struct ChainState {
    next_asset_id: u64,
    assets: BTreeMap<AssetId, AssetParameters>,
    holdings: HashMap<Address, BTreeMap<AssetId, AssetHolding>>,
}

impl ChainState {
    pub(crate) fn new(first_asset_id: u64) -> Self {
        Self {
            next_asset_id: first_asset_id,
            assets: BTreeMap::new(),
            holdings: HashMap::new(),
        }
    }

    /// Applies `txn`, returning the id of the asset it created, if any. A
    /// rejected transaction leaves the state untouched.
    pub(crate) fn apply(&mut self, txn: &Transaction) -> Result<Option<AssetId>, Rejection> {
        let mut next = self.clone();
        let created = next.apply_in_place(txn)?;
        *self = next;
        Ok(created)
    }

    fn apply_in_place(&mut self, txn: &Transaction) -> Result<Option<AssetId>, Rejection> {
        let sender = txn.sender();
        match &txn.kind {
            TxKind::AssetConfig(cfg) if cfg.asset_id.is_zero() => {
                self.create(sender, &cfg.params.spec, cfg.params.roles).map(Some)
            }
            TxKind::AssetConfig(cfg) => self.reconfigure(sender, cfg).map(|_| None),
            TxKind::AssetTransfer(xfer) => self.transfer(sender, xfer).map(|_| None),
            TxKind::AssetFreeze(frz) => self.freeze(sender, frz).map(|_| None),
        }
    }

    pub(crate) fn account(&self, address: Address, round: Round) -> AccountInformation {
        let assets = self
            .holdings
            .get(&address)
            .map(|h| h.values().copied().collect())
            .unwrap_or_default();
        let created_assets = self
            .assets
            .iter()
            .filter(|(_, params)| params.creator == address)
            .map(|(index, params)| CreatedAsset {
                index: *index,
                params: params.clone(),
            })
            .collect();

        AccountInformation {
            address,
            amount: 0,
            assets,
            created_assets,
            round,
        }
    }

    fn asset(&self, asset_id: AssetId) -> Result<&AssetParameters, Rejection> {
        self.assets
            .get(&asset_id)
            .ok_or_else(|| format!("asset {asset_id} does not exist"))
    }

    fn holding_mut(
        &mut self,
        account: Address,
        asset_id: AssetId,
    ) -> Result<&mut AssetHolding, Rejection> {
        self.holdings
            .get_mut(&account)
            .and_then(|h| h.get_mut(&asset_id))
            .ok_or_else(|| format!("{account} is not opted in to asset {asset_id}"))
    }

    fn has_holding(&self, account: Address, asset_id: AssetId) -> bool {
        self.holdings
            .get(&account)
            .is_some_and(|h| h.contains_key(&asset_id))
    }

    fn create(
        &mut self,
        creator: Address,
        spec: &AssetSpec,
        roles: ControlRoles,
    ) -> Result<AssetId, Rejection> {
        check_spec(spec)?;

        let asset_id = AssetId::new(self.next_asset_id);
        self.next_asset_id += 1;

        self.assets.insert(
            asset_id,
            AssetParameters {
                creator,
                spec: spec.clone(),
                roles,
            },
        );
        self.holdings.entry(creator).or_default().insert(
            asset_id,
            AssetHolding {
                asset_id,
                amount: spec.total,
                is_frozen: false,
            },
        );
        Ok(asset_id)
    }

    fn reconfigure(&mut self, sender: Address, cfg: &AssetConfig) -> Result<(), Rejection> {
        let current = self.asset(cfg.asset_id)?.roles;
        if current.manager != Some(sender) {
            return Err(format!("{sender} is not the manager of asset {}", cfg.asset_id));
        }

        let new = cfg.params.roles;
        if cfg.params.spec == AssetSpec::default() && new == ControlRoles::default() {
            return self.destroy(cfg.asset_id);
        }

        let re_enabled = [
            (current.manager, new.manager),
            (current.reserve, new.reserve),
            (current.freeze, new.freeze),
            (current.clawback, new.clawback),
        ]
        .iter()
        .any(|(old, new)| old.is_none() && new.is_some());
        if re_enabled {
            return Err("a cleared role cannot be set again".to_owned());
        }

        if let Some(params) = self.assets.get_mut(&cfg.asset_id) {
            params.roles = new;
        }
        Ok(())
    }

    fn destroy(&mut self, asset_id: AssetId) -> Result<(), Rejection> {
        let params = self.asset(asset_id)?;
        let (creator, total) = (params.creator, params.spec.total);
        let held = self.holding_mut(creator, asset_id)?.amount;
        if held != total {
            return Err(format!("creator holds {held} of {total} units"));
        }
        self.assets.remove(&asset_id);
        for holdings in self.holdings.values_mut() {
            holdings.remove(&asset_id);
        }
        Ok(())
    }

    fn transfer(&mut self, sender: Address, xfer: &AssetTransfer) -> Result<(), Rejection> {
        let asset_id = xfer.asset_id;
        let params = self.asset(asset_id)?.clone();

        let is_opt_in = xfer.amount == 0
            && xfer.receiver == sender
            && xfer.revocation_target.is_none()
            && xfer.close_to.is_none();
        if is_opt_in && !self.has_holding(sender, asset_id) {
            self.holdings.entry(sender).or_default().insert(
                asset_id,
                AssetHolding {
                    asset_id,
                    amount: 0,
                    is_frozen: params.spec.default_frozen,
                },
            );
            return Ok(());
        }

        let (source, clawback) = match xfer.revocation_target {
            Some(target) => {
                if params.roles.clawback != Some(sender) {
                    return Err(format!("{sender} is not the clawback of asset {asset_id}"));
                }
                (target, true)
            }
            None => (sender, false),
        };

        if !self.has_holding(xfer.receiver, asset_id) {
            return Err(format!(
                "{} is not opted in to asset {asset_id}",
                xfer.receiver
            ));
        }

        let from = self.holding_mut(source, asset_id)?;
        if from.is_frozen && !clawback {
            return Err(format!("{source} is frozen for asset {asset_id}"));
        }
        if from.amount < xfer.amount {
            return Err(format!(
                "{source} holds {} of asset {asset_id}, needs {}",
                from.amount, xfer.amount
            ));
        }
        from.amount -= xfer.amount;

        let to = self.holding_mut(xfer.receiver, asset_id)?;
        if to.is_frozen && !clawback {
            return Err(format!("{} is frozen for asset {asset_id}", xfer.receiver));
        }
        to.amount += xfer.amount;

        if let Some(close_to) = xfer.close_to {
            self.close_out(source, close_to, &params, asset_id)?;
        }
        Ok(())
    }

    fn close_out(
        &mut self,
        account: Address,
        close_to: Address,
        params: &AssetParameters,
        asset_id: AssetId,
    ) -> Result<(), Rejection> {
        if account == params.creator {
            return Err("the creator cannot close out of its asset".to_owned());
        }
        let rest = self.holding_mut(account, asset_id)?.amount;
        let to = self.holding_mut(close_to, asset_id)?;
        if to.is_frozen {
            return Err(format!("{close_to} is frozen for asset {asset_id}"));
        }
        to.amount += rest;
        if let Some(h) = self.holdings.get_mut(&account) {
            h.remove(&asset_id);
        }
        Ok(())
    }

    fn freeze(&mut self, sender: Address, frz: &AssetFreeze) -> Result<(), Rejection> {
        let params = self.asset(frz.asset_id)?;
        if params.roles.freeze != Some(sender) {
            return Err(format!("{sender} is not the freeze account of asset {}", frz.asset_id));
        }
        self.holding_mut(frz.target, frz.asset_id)?.is_frozen = frz.frozen;
        Ok(())
    }
}

fn check_spec(spec: &AssetSpec) -> Result<(), Rejection> {
    let too_long =
        |field: &Option<String>, max: usize| field.as_ref().is_some_and(|s| s.len() > max);

    if spec.decimals > MAX_DECIMALS {
        return Err(format!("decimals {} above {MAX_DECIMALS}", spec.decimals));
    }
    if too_long(&spec.unit_name, MAX_UNIT_NAME_LEN) {
        return Err("unit name too long".to_owned());
    }
    if too_long(&spec.asset_name, MAX_ASSET_NAME_LEN) {
        return Err("asset name too long".to_owned());
    }
    if too_long(&spec.url, MAX_URL_LEN) {
        return Err("url too long".to_owned());
    }
    Ok(())
}
