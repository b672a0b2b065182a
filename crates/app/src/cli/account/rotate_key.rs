use appcontrol_app::{
    database::{self, Db},
    domain::accounts::service::{AccountsService, PgAccountsService},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RotateKeyArgs {
    /// Account whose API key should be replaced
    #[arg(long)]
    account_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RotateKeyArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAccountsService::new(&Db::new(pool));

    let api_key = service
        .rotate_api_key(&crate::cli::operator(), args.account_uuid.into())
        .await
        .map_err(|error| format!("failed to rotate api key: {error}"))?;

    println!("account_uuid: {}", args.account_uuid);
    println!("api_key: {}", *api_key);
    println!("store this key now; it is only shown once");

    Ok(())
}
