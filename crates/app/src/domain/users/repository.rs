//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::Role,
    domain::{
        accounts::records::AccountUuid,
        entities::records::EntityUuid,
        users::{
            data::{AccountUserUpdate, NewAccountUser},
            records::{AccountUserRecord, AccountUserUuid},
        },
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

/// An empty grant list is stored as NULL, meaning "all entities".
fn entity_uuids_param(entity_uuids: Vec<EntityUuid>) -> Option<Vec<Uuid>> {
    if entity_uuids.is_empty() {
        None
    } else {
        Some(entity_uuids.into_iter().map(EntityUuid::into_uuid).collect())
    }
}

/// PostgreSQL-backed account users repository.
#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(
        &self,
        user: NewAccountUser,
    ) -> Result<AccountUserRecord, sqlx::Error> {
        query_as::<Postgres, AccountUserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.account_uuid.map(AccountUuid::into_uuid))
            .bind(user.subject_id)
            .bind(user.email)
            .bind(user.display_name)
            .bind(user.role.as_str())
            .bind(entity_uuids_param(user.entity_uuids))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        user: AccountUserUuid,
    ) -> Result<Option<AccountUserRecord>, sqlx::Error> {
        query_as::<Postgres, AccountUserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<AccountUserRecord>, sqlx::Error> {
        query_as::<Postgres, AccountUserRecord>(LIST_USERS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        user: AccountUserUuid,
        update: AccountUserUpdate,
    ) -> Result<Option<AccountUserRecord>, sqlx::Error> {
        query_as::<Postgres, AccountUserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(update.account_uuid.map(AccountUuid::into_uuid))
            .bind(update.email)
            .bind(update.display_name)
            .bind(update.role.as_str())
            .bind(entity_uuids_param(update.entity_uuids))
            .bind(update.is_active)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn delete_user(&self, user: AccountUserUuid) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for AccountUserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let role = role
            .parse::<Role>()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(err),
            })?;

        Ok(Self {
            uuid: AccountUserUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: row
                .try_get::<Option<Uuid>, _>("account_uuid")?
                .map(AccountUuid::from_uuid),
            subject_id: row.try_get("subject_id")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            role,
            entity_uuids: row
                .try_get::<Option<Vec<Uuid>>, _>("entity_uuids")?
                .map(|uuids| uuids.into_iter().map(EntityUuid::from_uuid).collect()),
            is_active: row.try_get("is_active")?,
            last_login_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_login_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
