//! Provisioning Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    entities::records::EntityUuid,
    provisioning::{
        data::StatusFilter,
        records::{ProvisioningTokenRecord, ProvisioningTokenUuid},
    },
};

const CREATE_TOKEN_SQL: &str = include_str!("sql/create_token.sql");
const FIND_TOKEN_SQL: &str = include_str!("sql/find_token.sql");
const MARK_USED_SQL: &str = include_str!("sql/mark_used.sql");
const DELETE_TOKEN_SQL: &str = include_str!("sql/delete_token.sql");
const LIST_TOKENS_SQL: &str = include_str!("sql/list_tokens.sql");
const GET_ENTITY_SQL: &str = include_str!("sql/get_entity_for_provisioning.sql");

/// Which column a redemption lookup goes through.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LookupKey {
    Token,
    ActivationCode,
}

impl LookupKey {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::ActivationCode => "code",
        }
    }
}

/// A token joined with the entity it provisions, as of lookup time.
#[derive(Debug)]
pub(crate) struct FoundToken {
    pub(crate) record: ProvisioningTokenRecord,
    pub(crate) entity_full_name: Option<String>,
}

/// The slice of an entity row the provisioning flow needs.
#[derive(Debug)]
pub(crate) struct ProvisioningEntity {
    pub(crate) entity_name: String,
    pub(crate) is_active: bool,
}

/// PostgreSQL-backed provisioning repository.
#[derive(Debug, Clone)]
pub(crate) struct PgProvisioningRepository {
    pool: PgPool,
}

impl PgProvisioningRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_entity(
        &self,
        entity: EntityUuid,
    ) -> Result<Option<ProvisioningEntity>, sqlx::Error> {
        query_as::<Postgres, ProvisioningEntity>(GET_ENTITY_SQL)
            .bind(entity.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_token(
        &self,
        uuid: ProvisioningTokenUuid,
        token: &str,
        activation_code: &str,
        entity: EntityUuid,
        entity_name: &str,
        expires_at: Timestamp,
    ) -> Result<ProvisioningTokenRecord, sqlx::Error> {
        query_as::<Postgres, ProvisioningTokenRecord>(CREATE_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .bind(token)
            .bind(activation_code)
            .bind(entity.into_uuid())
            .bind(entity_name)
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_token(
        &self,
        key: LookupKey,
        value: &str,
    ) -> Result<Option<FoundToken>, sqlx::Error> {
        query_as::<Postgres, FoundToken>(FIND_TOKEN_SQL)
            .bind(key.as_str())
            .bind(value)
            .fetch_optional(&self.pool)
            .await
    }

    /// Guarded flip to `used`. Zero rows means another redemption won.
    pub(crate) async fn mark_used(
        &self,
        uuid: ProvisioningTokenUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(MARK_USED_SQL)
            .bind(uuid.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_token(
        &self,
        uuid: ProvisioningTokenUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn list_tokens(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<ProvisioningTokenRecord>, sqlx::Error> {
        query_as::<Postgres, ProvisioningTokenRecord>(LIST_TOKENS_SQL)
            .bind(filter.as_str())
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProvisioningTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProvisioningTokenUuid::from_uuid(row.try_get("uuid")?),
            token: row.try_get("token")?,
            activation_code: row.try_get("activation_code")?,
            entity_uuid: EntityUuid::from_uuid(row.try_get("entity_uuid")?),
            entity_name: row.try_get("entity_name")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            used: row.try_get("used")?,
            used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("used_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for FoundToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            record: ProvisioningTokenRecord::from_row(row)?,
            entity_full_name: row.try_get("entity_full_name")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProvisioningEntity {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            entity_name: row.try_get("entity_name")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
