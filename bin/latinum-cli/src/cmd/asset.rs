use argh::FromArgs;
use latinum_cli_common::errors::DisplayedError;
use latinum_ledger_types::AssetSpec;
use latinum_primitives::{AssetId, MetadataHash};

use super::op_error;
use crate::context::Context;

/// Creates an asset; the creator receives the whole issuance
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "create")]
pub(crate) struct CreateArgs {
    #[argh(
        option,
        default = "String::from(\"account1\")",
        description = "creating account (default account1)"
    )]
    pub(crate) creator: String,

    #[argh(
        option,
        default = "String::from(\"account2\")",
        description = "manager, also given reserve, freeze and clawback (default account2)"
    )]
    pub(crate) manager: String,

    #[argh(option, default = "1000", description = "total issuance in base units")]
    pub(crate) total: u64,

    #[argh(option, default = "0", description = "decimals shown by wallets")]
    pub(crate) decimals: u32,

    #[argh(switch, description = "new holdings start frozen")]
    pub(crate) default_frozen: bool,

    #[argh(
        option,
        default = "String::from(\"LATINUM\")",
        description = "unit name"
    )]
    pub(crate) unit_name: String,

    #[argh(
        option,
        default = "String::from(\"latinum\")",
        description = "asset name"
    )]
    pub(crate) asset_name: String,

    #[argh(option, description = "URL describing the asset")]
    pub(crate) url: Option<String>,

    #[argh(option, description = "32 character metadata hash")]
    pub(crate) metadata_hash: Option<MetadataHash>,
}

impl CreateArgs {
    fn spec(&self) -> AssetSpec {
        AssetSpec {
            total: self.total,
            decimals: self.decimals,
            default_frozen: self.default_frozen,
            unit_name: Some(self.unit_name.clone()),
            asset_name: Some(self.asset_name.clone()),
            url: self.url.clone(),
            metadata_hash: self.metadata_hash,
        }
    }
}

pub(crate) async fn create(args: CreateArgs, ctx: &Context) -> Result<(), DisplayedError> {
    let creator = ctx.account(&args.creator)?;
    let manager = ctx.address(&args.manager)?;

    let asset_id = ctx
        .service
        .create_asset(&creator, manager, args.spec())
        .await
        .map_err(op_error("failed to create asset"))?;

    println!("{asset_id}");
    Ok(())
}

/// Hands the manager role of an asset to another account
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "configure")]
pub(crate) struct ConfigureArgs {
    #[argh(positional, description = "asset id")]
    pub(crate) asset_id: AssetId,

    #[argh(
        option,
        default = "String::from(\"account2\")",
        description = "current manager, signs the change (default account2)"
    )]
    pub(crate) manager: String,

    #[argh(
        option,
        default = "String::from(\"account1\")",
        description = "new manager (default account1)"
    )]
    pub(crate) new_manager: String,
}

pub(crate) async fn configure(args: ConfigureArgs, ctx: &Context) -> Result<(), DisplayedError> {
    let manager = ctx.account(&args.manager)?;
    let new_manager = ctx.address(&args.new_manager)?;

    let confirmed = ctx
        .service
        .configure_asset(args.asset_id, &manager, new_manager)
        .await
        .map_err(op_error("failed to reconfigure asset"))?;

    println!("{} confirmed in round {}", confirmed.txid, confirmed.confirmed_round);
    Ok(())
}
