//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::accounts::{
    data::{AccountUpdate, NewAccount},
    records::{AccountRecord, AccountUuid},
};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const GET_ACCOUNT_SQL: &str = include_str!("sql/get_account.sql");
const LIST_ACCOUNTS_SQL: &str = include_str!("sql/list_accounts.sql");
const UPDATE_ACCOUNT_SQL: &str = include_str!("sql/update_account.sql");
const DELETE_ACCOUNT_SQL: &str = include_str!("sql/delete_account.sql");
const ROTATE_API_KEY_SQL: &str = include_str!("sql/rotate_api_key.sql");

/// PostgreSQL-backed accounts repository.
#[derive(Debug, Clone)]
pub(crate) struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_account(
        &self,
        account: NewAccount,
        database_name: String,
        storage_id: String,
        api_key: &str,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(account.billing_name)
            .bind(account.billing_email)
            .bind(account.billing_phone)
            .bind(account.billing_address)
            .bind(account.billing_country)
            .bind(account.billing_tax_id)
            .bind(account.billing_notes)
            .bind(account.contact_email)
            .bind(account.contact_phone)
            .bind(database_name)
            .bind(storage_id)
            .bind(api_key)
            .bind(account.max_entities)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_account(
        &self,
        account: AccountUuid,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(GET_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_accounts(&self) -> Result<Vec<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(LIST_ACCOUNTS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(UPDATE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .bind(update.billing_name)
            .bind(update.billing_email)
            .bind(update.billing_phone)
            .bind(update.billing_address)
            .bind(update.billing_country)
            .bind(update.billing_tax_id)
            .bind(update.billing_notes)
            .bind(update.contact_email)
            .bind(update.contact_phone)
            .bind(update.max_entities)
            .bind(update.is_active)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn delete_account(&self, account: AccountUuid) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn rotate_api_key(
        &self,
        account: AccountUuid,
        api_key: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(ROTATE_API_KEY_SQL)
            .bind(account.into_uuid())
            .bind(api_key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            billing_name: row.try_get("billing_name")?,
            billing_email: row.try_get("billing_email")?,
            billing_phone: row.try_get("billing_phone")?,
            billing_address: row.try_get("billing_address")?,
            billing_country: row.try_get("billing_country")?,
            billing_tax_id: row.try_get("billing_tax_id")?,
            billing_notes: row.try_get("billing_notes")?,
            contact_email: row.try_get("contact_email")?,
            contact_phone: row.try_get("contact_phone")?,
            database_name: row.try_get("database_name")?,
            storage_id: row.try_get("storage_id")?,
            is_active: row.try_get("is_active")?,
            max_entities: row.try_get("max_entities")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
