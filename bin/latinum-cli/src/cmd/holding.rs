use argh::FromArgs;
use latinum_cli_common::errors::DisplayedError;
use latinum_ledger_types::AssetHolding;
use latinum_primitives::{Address, AssetId};

use super::op_error;
use crate::context::Context;

/// Opts an account in to receiving an asset
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "opt-in")]
pub(crate) struct OptInArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(
        option,
        default = "String::from(\"account3\")",
        description = "account opting in (default account3)"
    )]
    pub(crate) account: String,
}

pub(crate) async fn opt_in(args: OptInArgs, ctx: &Context) -> Result<(), DisplayedError> {
    let account = ctx.account(&args.account)?;
    let holding = ctx
        .service
        .opt_in(args.asset_id, &account)
        .await
        .map_err(op_error("failed to opt in"))?;

    print_holding(account.address(), args.asset_id, holding);
    Ok(())
}

/// Transfers asset units between accounts
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "transfer")]
pub(crate) struct TransferArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(
        option,
        default = "String::from(\"account1\")",
        description = "sending account (default account1)"
    )]
    pub(crate) from: String,

    #[argh(option, description = "recipient, an account name or address")]
    pub(crate) to: String,

    #[argh(option, default = "10", description = "amount in base units (default 10)")]
    pub(crate) amount: u64,
}

pub(crate) async fn transfer(args: TransferArgs, ctx: &Context) -> Result<(), DisplayedError> {
    let sender = ctx.account(&args.from)?;
    let recipient = ctx.address(&args.to)?;
    let holding = ctx
        .service
        .transfer(args.asset_id, &sender, recipient, args.amount)
        .await
        .map_err(op_error("failed to transfer"))?;

    print_holding(recipient, args.asset_id, holding);
    Ok(())
}

/// Freezes an account's holding of an asset
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "freeze")]
pub(crate) struct FreezeArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(
        option,
        default = "String::from(\"account2\")",
        description = "holder of the freeze role (default account2)"
    )]
    pub(crate) requestor: String,

    #[argh(option, description = "account whose holding is frozen")]
    pub(crate) target: String,
}

pub(crate) async fn freeze(args: FreezeArgs, ctx: &Context) -> Result<(), DisplayedError> {
    set_frozen(args.asset_id, &args.requestor, &args.target, true, ctx).await
}

/// Unfreezes an account's holding of an asset
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "unfreeze")]
pub(crate) struct UnfreezeArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(
        option,
        default = "String::from(\"account2\")",
        description = "holder of the freeze role (default account2)"
    )]
    pub(crate) requestor: String,

    #[argh(option, description = "account whose holding is unfrozen")]
    pub(crate) target: String,
}

pub(crate) async fn unfreeze(args: UnfreezeArgs, ctx: &Context) -> Result<(), DisplayedError> {
    set_frozen(args.asset_id, &args.requestor, &args.target, false, ctx).await
}

async fn set_frozen(
    asset_id: AssetId,
    requestor: &str,
    target: &str,
    frozen: bool,
    ctx: &Context,
) -> Result<(), DisplayedError> {
    let requestor = ctx.account(requestor)?;
    let target = ctx.address(target)?;

    let res = if frozen {
        ctx.service.freeze(asset_id, &requestor, target).await
    } else {
        ctx.service.unfreeze(asset_id, &requestor, target).await
    };
    let holding = res.map_err(op_error(if frozen {
        "failed to freeze"
    } else {
        "failed to unfreeze"
    }))?;

    print_holding(target, asset_id, holding);
    Ok(())
}

pub(crate) fn print_holding(account: Address, asset_id: AssetId, holding: Option<AssetHolding>) {
    match holding {
        Some(h) => println!(
            "{account} holds {} of asset {asset_id}{}",
            h.amount,
            if h.is_frozen { " (frozen)" } else { "" }
        ),
        None => println!("{account} does not hold asset {asset_id}"),
    }
}
