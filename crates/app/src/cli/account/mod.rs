use clap::{Args, Subcommand};

mod create;
mod rotate_key;

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    Create(create::CreateAccountArgs),
    RotateKey(rotate_key::RotateKeyArgs),
}

pub(crate) async fn run(command: AccountCommand) -> Result<(), String> {
    match command.command {
        AccountSubcommand::Create(args) => create::run(args).await,
        AccountSubcommand::RotateKey(args) => rotate_key::run(args).await,
    }
}
