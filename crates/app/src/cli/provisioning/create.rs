use appcontrol_app::{
    database::{self, Db},
    domain::provisioning::service::{PgProvisioningService, ProvisioningService},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Entity the issued token will enroll devices into
    #[arg(long)]
    entity_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProvisioningService::new(&Db::new(pool));

    let issued = service
        .create_token(&crate::cli::operator(), args.entity_uuid.into())
        .await
        .map_err(|error| format!("failed to create provisioning token: {error}"))?;

    println!("token_uuid: {}", issued.record.uuid);
    println!("entity_name: {}", issued.record.entity_name);
    println!("activation_code: {}", issued.record.activation_code);
    println!("deep_link: {}", issued.deep_link);
    println!("expires_at: {}", issued.record.expires_at);

    Ok(())
}
