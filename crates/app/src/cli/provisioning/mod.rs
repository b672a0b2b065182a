use clap::{Args, Subcommand};

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct ProvisioningCommand {
    #[command(subcommand)]
    command: ProvisioningSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProvisioningSubcommand {
    Create(create::CreateTokenArgs),
    List(list::ListTokensArgs),
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: ProvisioningCommand) -> Result<(), String> {
    match command.command {
        ProvisioningSubcommand::Create(args) => create::run(args).await,
        ProvisioningSubcommand::List(args) => list::run(args).await,
        ProvisioningSubcommand::Revoke(args) => revoke::run(args).await,
    }
}
