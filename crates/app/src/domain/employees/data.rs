//! Employee input data.

use zeroize::Zeroizing;

use crate::domain::employees::records::EmployeeUuid;

/// Data required to register an employee. The access key is hashed
/// before storage and dropped from memory after.
#[derive(Debug)]
pub struct NewEmployee {
    pub uuid: EmployeeUuid,
    pub employee_code: String,
    pub badge_number: String,
    pub profile: String,
    pub access_key: Zeroizing<String>,
}

/// A mobile login attempt.
#[derive(Debug)]
pub struct LoginRequest {
    pub badge_number: String,
    pub access_key: Zeroizing<String>,
    /// Hardware id of the device, when the client reports one.
    pub hardware_id: Option<String>,
}
