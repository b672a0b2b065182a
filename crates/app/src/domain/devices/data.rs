//! Device input data.

use crate::domain::devices::records::{DeviceStatus, DeviceUuid};

/// Data reported by a device registering itself.
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub uuid: DeviceUuid,
    pub hardware_id: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub line_number: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<String>,
    pub radius_m: Option<i32>,
    pub app_version: Option<String>,
}

/// Administrative update to a registered device.
#[derive(Debug, Clone)]
pub struct DeviceUpdate {
    pub status: DeviceStatus,
    pub line_number: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<String>,
    pub radius_m: Option<i32>,
    pub panic_enabled: bool,
}
