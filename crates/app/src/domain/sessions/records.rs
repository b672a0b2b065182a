//! Session Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::entities::records::EntityUuid, uuids::TypedUuid};

/// Assignment UUID
pub type AssignmentUuid = TypedUuid<AssignmentRecord>;

/// One row of the append-only shift log.
///
/// Time-of-day fields are wall-clock strings exactly as the device
/// reported them; the server never reinterprets them.
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    pub uuid: AssignmentUuid,
    pub entity_uuid: EntityUuid,
    pub employee_code: String,
    pub client_code: String,
    pub site_code: String,
    pub post_code: String,
    pub shift_date: String,
    pub ingress_time: String,
    pub egress_time: Option<String>,
    pub real_egress_time: Option<String>,
    pub recorded_by: String,
    pub device_time: String,
    pub created_at: Timestamp,
}

/// Whether a last-session row represents a shift in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

impl SessionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSessionStateError(pub String);

impl fmt::Display for ParseSessionStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown session state '{}'", self.0)
    }
}

impl std::error::Error for ParseSessionStateError {}

impl FromStr for SessionState {
    type Err = ParseSessionStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(ParseSessionStateError(other.to_string())),
        }
    }
}

/// The denormalized current-shift projection, one row per employee per
/// entity. Overwritten on every check-in, last write wins.
#[derive(Debug, Clone)]
pub struct LastSessionRecord {
    pub entity_uuid: EntityUuid,
    pub employee_code: String,
    /// Back-reference into the log; nulled if the assignment is purged.
    pub assignment_uuid: Option<AssignmentUuid>,
    pub client_code: String,
    pub client_name: String,
    pub site_code: String,
    pub site_name: String,
    pub post_code: String,
    pub post_name: String,
    pub shift_date: String,
    pub ingress_time: String,
    pub egress_time: Option<String>,
    pub state: SessionState,
    pub recorded_by: String,
    pub device_time: String,
    pub updated_at: Timestamp,
}
