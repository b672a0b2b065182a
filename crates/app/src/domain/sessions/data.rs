//! Session input data.

use crate::domain::sessions::records::AssignmentUuid;

/// A check-in reported by a device.
///
/// Codes go into the append-only log; the display names only live in the
/// last-session projection.
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub employee_code: String,
    pub client_code: String,
    pub client_name: String,
    pub site_code: String,
    pub site_name: String,
    pub post_code: String,
    pub post_name: String,
    pub shift_date: String,
    pub ingress_time: String,
    pub recorded_by: String,
    pub device_time: String,
}

/// A check-out closing a previously recorded assignment.
#[derive(Debug, Clone)]
pub struct CheckOut {
    pub assignment_uuid: AssignmentUuid,
    pub employee_code: String,
    /// Scheduled end of shift.
    pub egress_time: String,
    /// Actual moment the employee left, when it differs.
    pub real_egress_time: Option<String>,
}

/// Receipt for a completed check-in.
#[derive(Debug, Clone, Copy)]
pub struct CheckInReceipt {
    pub assignment_uuid: AssignmentUuid,
}
