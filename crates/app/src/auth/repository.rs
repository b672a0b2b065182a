//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    accounts::records::AccountUuid, entities::records::EntityUuid,
    users::records::AccountUserUuid,
};

const FIND_ACCOUNT_BY_API_KEY_SQL: &str = include_str!("sql/find_account_by_api_key.sql");
const FIND_USER_BY_SUBJECT_SQL: &str = include_str!("sql/find_user_by_subject.sql");
const TOUCH_LAST_LOGIN_SQL: &str = include_str!("sql/touch_last_login.sql");
const FIND_DEVICE_STATUS_SQL: &str = include_str!("sql/find_device_status.sql");

/// Account row matched by API key.
#[derive(Debug, Clone)]
pub(crate) struct ApiKeyAccount {
    pub uuid: AccountUuid,
    pub is_active: bool,
}

/// Account-user row matched by provider subject id, joined with the
/// owning account's active flag.
#[derive(Debug, Clone)]
pub(crate) struct SubjectUser {
    pub uuid: AccountUserUuid,
    pub subject_id: String,
    pub role: String,
    pub account_uuid: Option<AccountUuid>,
    pub entity_uuids: Option<Vec<EntityUuid>>,
    pub is_active: bool,
    pub account_is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_account_by_api_key(
        &self,
        api_key: &str,
    ) -> Result<Option<ApiKeyAccount>, sqlx::Error> {
        query_as::<Postgres, ApiKeyAccount>(FIND_ACCOUNT_BY_API_KEY_SQL)
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Option<SubjectUser>, sqlx::Error> {
        query_as::<Postgres, SubjectUser>(FIND_USER_BY_SUBJECT_SQL)
            .bind(subject_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_last_login(&self, user: AccountUserUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_LAST_LOGIN_SQL)
            .bind(user.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_device_status(
        &self,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(FIND_DEVICE_STATUS_SQL)
            .bind(entity.into_uuid())
            .bind(hardware_id)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ApiKeyAccount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SubjectUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUserUuid::from_uuid(row.try_get("uuid")?),
            subject_id: row.try_get("subject_id")?,
            role: row.try_get("role")?,
            account_uuid: row
                .try_get::<Option<Uuid>, _>("account_uuid")?
                .map(AccountUuid::from_uuid),
            entity_uuids: row
                .try_get::<Option<Vec<Uuid>>, _>("entity_uuids")?
                .map(|uuids| uuids.into_iter().map(EntityUuid::from_uuid).collect()),
            is_active: row.try_get("is_active")?,
            account_is_active: row.try_get("account_is_active")?,
        })
    }
}
