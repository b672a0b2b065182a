//! Devices Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    devices::{
        data::{DeviceUpdate, NewDevice},
        records::{DeviceRecord, DeviceStatus, DeviceUuid},
    },
    entities::records::EntityUuid,
};

const REGISTER_DEVICE_SQL: &str = include_str!("sql/register_device.sql");
const GET_DEVICE_SQL: &str = include_str!("sql/get_device.sql");
const LIST_DEVICES_SQL: &str = include_str!("sql/list_devices.sql");
const UPDATE_DEVICE_SQL: &str = include_str!("sql/update_device.sql");
const DELETE_DEVICE_SQL: &str = include_str!("sql/delete_device.sql");
const SET_PANIC_ENABLED_SQL: &str = include_str!("sql/set_panic_enabled.sql");
const UPDATE_APP_VERSION_SQL: &str = include_str!("sql/update_app_version.sql");

/// PostgreSQL-backed devices repository.
#[derive(Debug, Clone)]
pub(crate) struct PgDevicesRepository {
    pool: PgPool,
}

impl PgDevicesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn register_device(
        &self,
        entity: EntityUuid,
        device: NewDevice,
    ) -> Result<DeviceRecord, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(REGISTER_DEVICE_SQL)
            .bind(device.uuid.into_uuid())
            .bind(entity.into_uuid())
            .bind(device.hardware_id)
            .bind(device.brand)
            .bind(device.model)
            .bind(device.line_number)
            .bind(device.location)
            .bind(device.coordinates)
            .bind(device.radius_m)
            .bind(device.app_version)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_device(
        &self,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<Option<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(GET_DEVICE_SQL)
            .bind(entity.into_uuid())
            .bind(hardware_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_devices(
        &self,
        entity: EntityUuid,
    ) -> Result<Vec<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(LIST_DEVICES_SQL)
            .bind(entity.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn update_device(
        &self,
        entity: EntityUuid,
        hardware_id: &str,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(UPDATE_DEVICE_SQL)
            .bind(entity.into_uuid())
            .bind(hardware_id)
            .bind(update.status.as_str())
            .bind(update.line_number)
            .bind(update.location)
            .bind(update.coordinates)
            .bind(update.radius_m)
            .bind(update.panic_enabled)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn delete_device(
        &self,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_DEVICE_SQL)
            .bind(entity.into_uuid())
            .bind(hardware_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn set_panic_enabled(
        &self,
        entity: EntityUuid,
        hardware_id: &str,
        enabled: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = query(SET_PANIC_ENABLED_SQL)
            .bind(entity.into_uuid())
            .bind(hardware_id)
            .bind(enabled)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn update_app_version(
        &self,
        entity: EntityUuid,
        hardware_id: &str,
        app_version: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(UPDATE_APP_VERSION_SQL)
            .bind(entity.into_uuid())
            .bind(hardware_id)
            .bind(app_version)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for DeviceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<DeviceStatus>()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(err),
            })?;

        Ok(Self {
            uuid: DeviceUuid::from_uuid(row.try_get("uuid")?),
            entity_uuid: EntityUuid::from_uuid(row.try_get("entity_uuid")?),
            hardware_id: row.try_get("hardware_id")?,
            status,
            brand: row.try_get("brand")?,
            model: row.try_get("model")?,
            line_number: row.try_get("line_number")?,
            location: row.try_get("location")?,
            coordinates: row.try_get("coordinates")?,
            radius_m: row.try_get("radius_m")?,
            app_version: row.try_get("app_version")?,
            panic_enabled: row.try_get("panic_enabled")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
