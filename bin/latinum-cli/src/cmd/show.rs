use argh::FromArgs;
use latinum_asset_ops::resolver;
use latinum_cli_common::errors::DisplayedError;
use latinum_primitives::AssetId;

use super::{holding::print_holding, op_error};
use crate::context::Context;

/// Shows the parameters of an asset as its creator sees them
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "show-asset")]
pub(crate) struct ShowAssetArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(
        option,
        default = "String::from(\"account1\")",
        description = "creator, an account name or address (default account1)"
    )]
    pub(crate) creator: String,
}

pub(crate) async fn show_asset(args: ShowAssetArgs, ctx: &Context) -> Result<(), DisplayedError> {
    let creator = ctx.address(&args.creator)?;
    let asset = resolver::lookup_created_asset(ctx.service.client(), creator, args.asset_id)
        .await
        .map_err(op_error("failed to look up asset"))?;

    let params = &asset.params;
    println!("asset {}", asset.index);
    println!("  creator:        {}", params.creator);
    println!("  name:           {}", params.spec.asset_name.as_deref().unwrap_or("-"));
    println!("  unit:           {}", params.spec.unit_name.as_deref().unwrap_or("-"));
    println!("  total:          {}", params.spec.total);
    println!("  decimals:       {}", params.spec.decimals);
    println!("  default frozen: {}", params.spec.default_frozen);
    for (role, addr) in [
        ("manager", params.roles.manager),
        ("reserve", params.roles.reserve),
        ("freeze", params.roles.freeze),
        ("clawback", params.roles.clawback),
    ] {
        match addr {
            Some(addr) => println!("  {role:<15} {addr}"),
            None => println!("  {role:<15} -"),
        }
    }
    Ok(())
}

/// Shows an account's holding of an asset
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "show-holding")]
pub(crate) struct ShowHoldingArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(option, description = "holder, an account name or address")]
    pub(crate) account: String,
}

pub(crate) async fn show_holding(
    args: ShowHoldingArgs,
    ctx: &Context,
) -> Result<(), DisplayedError> {
    let account = ctx.address(&args.account)?;
    let holding = resolver::report_holding(ctx.service.client(), account, args.asset_id)
        .await
        .map_err(op_error("failed to look up holding"))?;

    print_holding(account, args.asset_id, holding);
    Ok(())
}
