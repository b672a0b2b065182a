use appcontrol_app::auth::{EntityScope, Principal, Role};
use clap::{Parser, Subcommand};

mod account;
mod provisioning;
mod user;

#[derive(Debug, Parser)]
#[command(name = "appcontrol-app", about = "AppControl CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Account(account::AccountCommand),
    User(user::UserCommand),
    Provisioning(provisioning::ProvisioningCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Account(command) => account::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Provisioning(command) => provisioning::run(command).await,
        }
    }
}

/// The identity CLI commands act as. Local shell access to the database
/// credentials already implies full control, so the operator channel is
/// a super admin.
pub(crate) fn operator() -> Principal {
    Principal {
        subject: "cli-operator".to_string(),
        role: Role::SuperAdmin,
        account_uuid: None,
        entity_scope: EntityScope::All,
        device: None,
    }
}
