//! Device Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::entities::records::EntityUuid, uuids::TypedUuid};

/// Device UUID
pub type DeviceUuid = TypedUuid<DeviceRecord>;

/// Operational status of a device. The wire values are the legacy
/// Spanish strings the mobile fleet already reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceStatus {
    #[default]
    Active,
    Suspended,
    Retired,
}

impl DeviceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVO",
            Self::Suspended => "SUSPENDIDO",
            Self::Retired => "BAJA",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeviceStatusError(pub String);

impl fmt::Display for ParseDeviceStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device status '{}'", self.0)
    }
}

impl std::error::Error for ParseDeviceStatusError {}

impl FromStr for DeviceStatus {
    type Err = ParseDeviceStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVO" => Ok(Self::Active),
            "SUSPENDIDO" => Ok(Self::Suspended),
            "BAJA" => Ok(Self::Retired),
            other => Err(ParseDeviceStatusError(other.to_string())),
        }
    }
}

/// Device Record
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub uuid: DeviceUuid,
    pub entity_uuid: EntityUuid,

    /// Stable hardware identifier reported by the device itself.
    pub hardware_id: String,

    pub status: DeviceStatus,

    pub brand: Option<String>,
    pub model: Option<String>,
    pub line_number: Option<String>,
    pub location: Option<String>,

    /// `"lat,lon"` as reported; not parsed server-side.
    pub coordinates: Option<String>,

    /// Geofence radius in meters around `coordinates`.
    pub radius_m: Option<i32>,

    pub app_version: Option<String>,
    pub panic_enabled: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
