use appcontrol_app::{
    database::{self, Db},
    domain::provisioning::{
        data::StatusFilter,
        records::TokenStatus,
        service::{PgProvisioningService, ProvisioningService},
    },
};
use clap::Args;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// Filter by derived status: all, active, used or expired
    #[arg(long, default_value = "all")]
    status: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

fn parse_filter(value: &str) -> Result<StatusFilter, String> {
    match value {
        "all" => Ok(StatusFilter::All),
        "active" => Ok(StatusFilter::Only(TokenStatus::Active)),
        "used" => Ok(StatusFilter::Only(TokenStatus::Used)),
        "expired" => Ok(StatusFilter::Only(TokenStatus::Expired)),
        other => Err(format!(
            "unknown status '{other}', expected all, active, used or expired"
        )),
    }
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let filter = parse_filter(&args.status)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProvisioningService::new(&Db::new(pool));

    let tokens = service
        .list_tokens(&crate::cli::operator(), filter)
        .await
        .map_err(|error| format!("failed to list provisioning tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no provisioning tokens found");
        return Ok(());
    }

    let now = Timestamp::now();

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("entity_uuid: {}", token.entity_uuid);
        println!("entity_name: {}", token.entity_name);
        println!("activation_code: {}", token.activation_code);
        println!("status: {}", token.status(now).as_str());
        println!("expires_at: {}", token.expires_at);
        println!(
            "used_at: {}",
            token
                .used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
