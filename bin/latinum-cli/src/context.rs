use std::str::FromStr;

use latinum_asset_ops::{signer_from_mnemonic, AssetService, ConfirmationPolicy, FeePolicy};
use latinum_cli_common::errors::{DisplayableError, DisplayedError};
use latinum_config::{ConfirmationConfig, FeeConfig, LatinumConfig};
use latinum_key_derivation::Account;
use latinum_ledger_client::AlgodClient;
use latinum_primitives::Address;
use tokio_util::sync::CancellationToken;

use crate::{cmd::op_error, settings::Settings};

/// Everything a command needs: the loaded config and a service bound to the
/// configured node.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) config: LatinumConfig,
    pub(crate) service: AssetService<AlgodClient>,
}

impl Context {
    pub(crate) fn new(settings: Settings, cancel: CancellationToken) -> Self {
        let config = settings.config;
        let algod = &config.algod;
        let client = AlgodClient::new(&algod.host, algod.port, algod.token.clone());

        let service = AssetService::new(client)
            .with_fee_policy(fee_policy(&config.fee))
            .with_note(config.fee.note.clone().into_bytes())
            .with_confirmation_policy(confirmation_policy(&config.confirmation))
            .with_cancellation(cancel);

        Self { config, service }
    }

    /// Resolves the named account from its configured mnemonic.
    pub(crate) fn account(&self, name: &str) -> Result<Account, DisplayedError> {
        let mnemonic = self
            .config
            .accounts
            .mnemonic(name)
            .user_error(format!("no mnemonic configured for {name}"))?;
        signer_from_mnemonic(mnemonic).map_err(op_error(format!("invalid mnemonic for {name}")))
    }

    /// Accepts either a configured account name or an address.
    pub(crate) fn address(&self, who: &str) -> Result<Address, DisplayedError> {
        if self.config.accounts.mnemonic(who).is_some() {
            return Ok(self.account(who)?.address());
        }
        Address::from_str(who)
            .user_error(format!("{who} is neither an account name nor an address"))
    }
}

pub(crate) fn fee_policy(config: &FeeConfig) -> FeePolicy {
    FeePolicy {
        fee: config.fee,
        flat_fee: config.flat_fee,
    }
}

/// Zero rounds means wait without bound.
pub(crate) fn confirmation_policy(config: &ConfirmationConfig) -> ConfirmationPolicy {
    match config.max_rounds {
        0 => ConfirmationPolicy::unbounded(),
        n => ConfirmationPolicy::bounded(n),
    }
}
