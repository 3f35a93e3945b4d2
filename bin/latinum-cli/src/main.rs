//! Latinum CLI: create and manage Algorand Standard Assets.

mod cmd;
mod context;
mod settings;

use std::process;

use cmd::{
    account::generate_account,
    asset::{configure, create},
    demo::demo,
    holding::{freeze, opt_in, transfer, unfreeze},
    show::{show_asset, show_holding},
    Commands, TopLevel,
};
use context::Context;
use latinum_common::logging;
use settings::Settings;
use tokio_util::sync::CancellationToken;
use tracing::*;

/// Prefix used for log files when the config names none.
const DEFAULT_LOG_PREFIX: &str = "latinum";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let TopLevel { config, cmd } = argh::from_env();

    // Needs neither a node nor a config.
    if let Commands::GenerateAccount(args) = cmd {
        generate_account(args);
        return;
    }

    let settings = Settings::load(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        process::exit(1);
    });

    if let Err(e) =
        logging::init_logging_from_config(settings.logging("latinum-cli", DEFAULT_LOG_PREFIX))
    {
        eprintln!("failed to initialize logging: {e}");
    }
    info!(env = %settings.env, config_file = %settings.config_file.display(), "loaded settings");

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let ctx = Context::new(settings, cancel);
    let result = match cmd {
        Commands::Create(args) => create(args, &ctx).await,
        Commands::Configure(args) => configure(args, &ctx).await,
        Commands::OptIn(args) => opt_in(args, &ctx).await,
        Commands::Transfer(args) => transfer(args, &ctx).await,
        Commands::Freeze(args) => freeze(args, &ctx).await,
        Commands::Unfreeze(args) => unfreeze(args, &ctx).await,
        Commands::ShowAsset(args) => show_asset(args, &ctx).await,
        Commands::ShowHolding(args) => show_holding(args, &ctx).await,
        Commands::Demo(args) => demo(args, &ctx).await,
        Commands::GenerateAccount(_) => unreachable!("handled prior"),
    };

    logging::finalize();

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(err.exit_code());
    }
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("interrupted, abandoning confirmation wait");
            cancel.cancel();
        }
        Err(e) => warn!(%e, "cannot listen for ctrl-c"),
    }
}
