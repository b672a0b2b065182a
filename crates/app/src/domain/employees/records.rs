//! Employee Records

use jiff::Timestamp;

use crate::{domain::entities::records::EntityUuid, uuids::TypedUuid};

/// Employee UUID
pub type EmployeeUuid = TypedUuid<EmployeeRecord>;

/// Employee Record
///
/// The access-key hash never leaves the repository layer.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub uuid: EmployeeUuid,
    pub entity_uuid: EntityUuid,

    /// Payroll code, the stable identifier shift records are keyed by.
    pub employee_code: String,

    /// Login identifier typed into the mobile app.
    pub badge_number: String,

    /// Job profile string, echoed into mobile token claims.
    pub profile: String,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A successful mobile login: the minted token plus the employee it
/// belongs to.
#[derive(Debug, Clone)]
pub struct MobileLogin {
    pub token: String,
    pub employee: EmployeeRecord,
}
