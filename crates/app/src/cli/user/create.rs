use appcontrol_app::{
    auth::Role,
    database::{self, Db},
    domain::users::{
        data::NewAccountUser,
        records::AccountUserUuid,
        service::{PgUsersService, UsersService},
    },
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Identity-provider subject id
    #[arg(long)]
    subject_id: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    display_name: String,

    /// One of: super_admin, account_admin, entity_admin, entity_user
    #[arg(long)]
    role: Role,

    /// Owning account; omit only for super admins
    #[arg(long)]
    account_uuid: Option<Uuid>,

    /// Entity grant, repeatable; omit for access to every entity
    #[arg(long = "entity-uuid")]
    entity_uuids: Vec<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(&Db::new(pool));

    let user = service
        .create_user(
            &crate::cli::operator(),
            NewAccountUser {
                uuid: AccountUserUuid::new(),
                account_uuid: args.account_uuid.map(Into::into),
                subject_id: args.subject_id,
                email: args.email,
                display_name: args.display_name,
                role: args.role,
                entity_uuids: args.entity_uuids.into_iter().map(Into::into).collect(),
            },
        )
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("subject_id: {}", user.subject_id);
    println!("role: {}", user.role);
    println!(
        "account_uuid: {}",
        user.account_uuid
            .map_or_else(|| "none".to_string(), |value| value.to_string())
    );

    Ok(())
}
