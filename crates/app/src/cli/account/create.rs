use appcontrol_app::{
    database::{self, Db},
    domain::accounts::{
        data::NewAccount,
        records::AccountUuid,
        service::{AccountsService, PgAccountsService},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateAccountArgs {
    /// Billing name; also the source of the derived database name
    #[arg(long)]
    billing_name: String,

    /// Billing contact email
    #[arg(long)]
    billing_email: Option<String>,

    /// Operational contact email
    #[arg(long)]
    contact_email: Option<String>,

    /// Entity quota for the account
    #[arg(long, default_value_t = 5)]
    max_entities: i32,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAccountArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAccountsService::new(&Db::new(pool));

    let created = service
        .create_account(
            &crate::cli::operator(),
            NewAccount {
                uuid: AccountUuid::new(),
                billing_name: args.billing_name,
                billing_email: args.billing_email,
                billing_phone: None,
                billing_address: None,
                billing_country: None,
                billing_tax_id: None,
                billing_notes: None,
                contact_email: args.contact_email,
                contact_phone: None,
                max_entities: args.max_entities,
            },
        )
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    println!("account_uuid: {}", created.account.uuid);
    println!("billing_name: {}", created.account.billing_name);
    println!("database_name: {}", created.account.database_name);
    println!("storage_id: {}", created.account.storage_id);
    println!("api_key: {}", *created.api_key);
    println!("store this key now; it is only shown once");

    Ok(())
}
