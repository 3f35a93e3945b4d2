use argh::FromArgs;
use latinum_cli_common::errors::{DisplayableError, DisplayedError};
use latinum_ledger_types::AssetSpec;
use latinum_primitives::MetadataHash;
use tracing::*;

use super::{holding::print_holding, op_error};
use crate::context::Context;

const DEMO_METADATA_HASH: &str = "16efaa3924a6fd9d3a4824799a4ac65d";

/// Runs the whole lifecycle with account1..account3: create, hand over
/// management, opt in, transfer, freeze and unfreeze
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "demo")]
pub(crate) struct DemoArgs {
    #[argh(option, default = "10", description = "amount sent to account3 (default 10)")]
    pub(crate) amount: u64,
}

pub(crate) fn demo_spec() -> Result<AssetSpec, DisplayedError> {
    let metadata_hash: MetadataHash = DEMO_METADATA_HASH
        .parse()
        .internal_error("bad demo metadata hash")?;
    Ok(AssetSpec {
        total: 1000,
        decimals: 0,
        default_frozen: false,
        unit_name: Some("LATINUM".to_owned()),
        asset_name: Some("latinum".to_owned()),
        url: Some("http://someurl".to_owned()),
        metadata_hash: Some(metadata_hash),
    })
}

pub(crate) async fn demo(args: DemoArgs, ctx: &Context) -> Result<(), DisplayedError> {
    let account1 = ctx.account("account1")?;
    let account2 = ctx.account("account2")?;
    let account3 = ctx.account("account3")?;
    let service = &ctx.service;

    info!("creating asset");
    let asset_id = service
        .create_asset(&account1, account2.address(), demo_spec()?)
        .await
        .map_err(op_error("failed to create asset"))?;
    println!("created asset {asset_id}");

    info!(%asset_id, "handing management to account1");
    service
        .configure_asset(asset_id, &account2, account1.address())
        .await
        .map_err(op_error("failed to reconfigure asset"))?;

    info!(%asset_id, "opting account3 in");
    let holding = service
        .opt_in(asset_id, &account3)
        .await
        .map_err(op_error("failed to opt in"))?;
    print_holding(account3.address(), asset_id, holding);

    info!(%asset_id, amount = args.amount, "transferring to account3");
    let holding = service
        .transfer(asset_id, &account1, account3.address(), args.amount)
        .await
        .map_err(op_error("failed to transfer"))?;
    print_holding(account3.address(), asset_id, holding);

    info!(%asset_id, "freezing account3");
    let holding = service
        .freeze(asset_id, &account2, account3.address())
        .await
        .map_err(op_error("failed to freeze"))?;
    print_holding(account3.address(), asset_id, holding);

    info!(%asset_id, "unfreezing account3");
    let holding = service
        .unfreeze(asset_id, &account2, account3.address())
        .await
        .map_err(op_error("failed to unfreeze"))?;
    print_holding(account3.address(), asset_id, holding);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_spec() {
        let spec = demo_spec().unwrap();
        assert_eq!(spec.total, 1000);
        assert_eq!(
            spec.metadata_hash.unwrap().as_bytes(),
            DEMO_METADATA_HASH.as_bytes()
        );
    }
}
