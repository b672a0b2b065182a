//! Entities Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar, types::Json,
};

use crate::domain::{
    accounts::records::AccountUuid,
    entities::{
        data::{EntityUpdate, NewEntity},
        records::{EntityRecord, EntityUuid},
        settings::EntitySettings,
    },
};

const CREATE_ENTITY_SQL: &str = include_str!("sql/create_entity.sql");
const GET_ENTITY_SQL: &str = include_str!("sql/get_entity.sql");
const LIST_ENTITIES_SQL: &str = include_str!("sql/list_entities.sql");
const UPDATE_ENTITY_SQL: &str = include_str!("sql/update_entity.sql");
const DEACTIVATE_ENTITY_SQL: &str = include_str!("sql/deactivate_entity.sql");
const COUNT_ENTITIES_SQL: &str = include_str!("sql/count_entities.sql");

/// PostgreSQL-backed entities repository.
#[derive(Debug, Clone)]
pub(crate) struct PgEntitiesRepository {
    pool: PgPool,
}

impl PgEntitiesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_entity(
        &self,
        account: AccountUuid,
        entity: NewEntity,
        storage_id: String,
    ) -> Result<EntityRecord, sqlx::Error> {
        query_as::<Postgres, EntityRecord>(CREATE_ENTITY_SQL)
            .bind(entity.uuid.into_uuid())
            .bind(account.into_uuid())
            .bind(entity.entity_name)
            .bind(entity.entity_full_name)
            .bind(storage_id)
            .bind(Json(entity.settings))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_entity(
        &self,
        entity: EntityUuid,
    ) -> Result<Option<EntityRecord>, sqlx::Error> {
        query_as::<Postgres, EntityRecord>(GET_ENTITY_SQL)
            .bind(entity.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_entities(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<EntityRecord>, sqlx::Error> {
        query_as::<Postgres, EntityRecord>(LIST_ENTITIES_SQL)
            .bind(account.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn update_entity(
        &self,
        entity: EntityUuid,
        update: EntityUpdate,
    ) -> Result<Option<EntityRecord>, sqlx::Error> {
        query_as::<Postgres, EntityRecord>(UPDATE_ENTITY_SQL)
            .bind(entity.into_uuid())
            .bind(update.entity_full_name)
            .bind(Json(update.settings))
            .bind(update.is_active)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn deactivate_entity(&self, entity: EntityUuid) -> Result<u64, sqlx::Error> {
        let result = query(DEACTIVATE_ENTITY_SQL)
            .bind(entity.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn count_entities(&self, account: AccountUuid) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_ENTITIES_SQL)
            .bind(account.into_uuid())
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for EntityRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: EntityUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            entity_name: row.try_get("entity_name")?,
            entity_full_name: row.try_get("entity_full_name")?,
            storage_id: row.try_get("storage_id")?,
            settings: row.try_get::<Json<EntitySettings>, _>("settings")?.0,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
