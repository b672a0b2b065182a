use appcontrol_app::{
    database::{self, Db},
    domain::provisioning::service::{PgProvisioningService, ProvisioningService},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProvisioningService::new(&Db::new(pool));

    service
        .revoke_token(&crate::cli::operator(), args.token_uuid.into())
        .await
        .map_err(|error| format!("failed to revoke provisioning token: {error}"))?;

    println!("revoked token {}", args.token_uuid);

    Ok(())
}
