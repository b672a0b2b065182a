//! Devices service.
//!
//! Device operations are reachable from the mobile channel, so the gate
//! is entity scope, not an administrative role. The per-request device
//! status check lives in the auth layer, not here.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{Principal, gate},
    database::Db,
    domain::{
        devices::{
            data::{DeviceUpdate, NewDevice},
            errors::DevicesServiceError,
            records::DeviceRecord,
            repository::PgDevicesRepository,
        },
        entities::records::EntityUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgDevicesService {
    repository: PgDevicesRepository,
}

impl PgDevicesService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: PgDevicesRepository::new(db.pool().clone()),
        }
    }
}

#[async_trait]
impl DevicesService for PgDevicesService {
    async fn register_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        device: NewDevice,
    ) -> Result<DeviceRecord, DevicesServiceError> {
        gate::require_entity_access(principal, entity)?;

        if device.hardware_id.trim().is_empty() {
            return Err(DevicesServiceError::MissingRequiredData);
        }

        Ok(self.repository.register_device(entity, device).await?)
    }

    async fn get_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<DeviceRecord, DevicesServiceError> {
        gate::require_entity_access(principal, entity)?;

        self.repository
            .get_device(entity, hardware_id)
            .await?
            .ok_or(DevicesServiceError::NotFound)
    }

    async fn list_devices(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<Vec<DeviceRecord>, DevicesServiceError> {
        gate::require_entity_access(principal, entity)?;

        Ok(self.repository.list_devices(entity).await?)
    }

    async fn update_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
        update: DeviceUpdate,
    ) -> Result<DeviceRecord, DevicesServiceError> {
        gate::require_entity_access(principal, entity)?;

        self.repository
            .update_device(entity, hardware_id, update)
            .await?
            .ok_or(DevicesServiceError::NotFound)
    }

    async fn delete_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<(), DevicesServiceError> {
        gate::require_write(principal)?;
        gate::require_entity_access(principal, entity)?;

        let rows_affected = self.repository.delete_device(entity, hardware_id).await?;

        if rows_affected == 0 {
            return Err(DevicesServiceError::NotFound);
        }

        Ok(())
    }

    async fn set_panic_enabled(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
        enabled: bool,
    ) -> Result<(), DevicesServiceError> {
        gate::require_entity_access(principal, entity)?;

        let rows_affected = self
            .repository
            .set_panic_enabled(entity, hardware_id, enabled)
            .await?;

        if rows_affected == 0 {
            return Err(DevicesServiceError::NotFound);
        }

        Ok(())
    }

    async fn update_app_version(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
        app_version: &str,
    ) -> Result<(), DevicesServiceError> {
        gate::require_entity_access(principal, entity)?;

        let rows_affected = self
            .repository
            .update_app_version(entity, hardware_id, app_version)
            .await?;

        if rows_affected == 0 {
            return Err(DevicesServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait DevicesService: Send + Sync {
    /// Registers a device under an entity. A duplicate hardware id
    /// within the entity is rejected.
    async fn register_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        device: NewDevice,
    ) -> Result<DeviceRecord, DevicesServiceError>;

    /// Retrieves a device by hardware id.
    async fn get_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<DeviceRecord, DevicesServiceError>;

    /// Lists the entity's devices.
    async fn list_devices(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<Vec<DeviceRecord>, DevicesServiceError>;

    /// Replaces a device's administrative fields, including status.
    async fn update_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
        update: DeviceUpdate,
    ) -> Result<DeviceRecord, DevicesServiceError>;

    /// Removes a device registration entirely. Write roles only.
    async fn delete_device(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
    ) -> Result<(), DevicesServiceError>;

    /// Toggles the panic-button feature for one device.
    async fn set_panic_enabled(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
        enabled: bool,
    ) -> Result<(), DevicesServiceError>;

    /// Records the app version a device is running.
    async fn update_app_version(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        hardware_id: &str,
        app_version: &str,
    ) -> Result<(), DevicesServiceError>;
}
