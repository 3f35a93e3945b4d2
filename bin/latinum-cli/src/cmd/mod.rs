use std::path::PathBuf;

use argh::FromArgs;
use latinum_asset_ops::AssetOpError;
use latinum_cli_common::errors::DisplayedError;

pub(crate) mod account;
pub(crate) mod asset;
pub(crate) mod demo;
pub(crate) mod holding;
pub(crate) mod show;

/// Create and manage Algorand Standard Assets
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct TopLevel {
    #[argh(
        option,
        short = 'c',
        description = "config file (default $LATINUM_CONFIG or latinum.toml)"
    )]
    pub(crate) config: Option<PathBuf>,

    #[argh(subcommand)]
    pub(crate) cmd: Commands,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Commands {
    GenerateAccount(account::GenerateAccountArgs),
    Create(asset::CreateArgs),
    Configure(asset::ConfigureArgs),
    OptIn(holding::OptInArgs),
    Transfer(holding::TransferArgs),
    Freeze(holding::FreezeArgs),
    Unfreeze(holding::UnfreezeArgs),
    ShowAsset(show::ShowAssetArgs),
    ShowHolding(show::ShowHoldingArgs),
    Demo(demo::DemoArgs),
}

/// Classifies an operation failure for display. Failures the caller can fix
/// (keys, arguments, ledger rule violations) are user errors.
pub(crate) fn op_error(msg: impl Into<String>) -> impl FnOnce(AssetOpError) -> DisplayedError {
    move |e| {
        let msg = msg.into();
        match e {
            AssetOpError::InvalidMnemonic(_)
            | AssetOpError::MissingRequiredField(_)
            | AssetOpError::WrongSigner { .. }
            | AssetOpError::NotFound { .. }
            | AssetOpError::LedgerRejected(_) => DisplayedError::UserError(msg, Box::new(e)),
            AssetOpError::NotACreationTransaction(_)
            | AssetOpError::Transport(_)
            | AssetOpError::ConfirmationTimeout { .. }
            | AssetOpError::Cancelled(_)
            | AssetOpError::Encoding(_) => DisplayedError::InternalError(msg, Box::new(e)),
        }
    }
}
