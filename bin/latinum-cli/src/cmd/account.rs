use argh::FromArgs;
use latinum_key_derivation::generate_account as new_account;

/// Generates a fresh account and prints its address and mnemonic
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "generate-account")]
pub(crate) struct GenerateAccountArgs {}

pub(crate) fn generate_account(_args: GenerateAccountArgs) {
    let account = new_account();
    println!("address:  {}", account.address());
    println!("mnemonic: {}", account.to_mnemonic());
}
