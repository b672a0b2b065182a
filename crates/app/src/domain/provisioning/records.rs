//! Provisioning Token Records

use std::fmt;

use jiff::Timestamp;

use crate::{domain::entities::records::EntityUuid, uuids::TypedUuid};

/// Provisioning Token UUID
pub type ProvisioningTokenUuid = TypedUuid<ProvisioningTokenRecord>;

/// Provisioning Token Record
#[derive(Debug, Clone)]
pub struct ProvisioningTokenRecord {
    pub uuid: ProvisioningTokenUuid,

    /// The opaque redeemable token, 64 hex chars.
    pub token: String,

    /// Human-typable equivalent, `PREFIX-XXXX-XXXX-XXXX`.
    pub activation_code: String,

    pub entity_uuid: EntityUuid,

    /// Snapshot of the entity's short name at issue time.
    pub entity_name: String,

    pub expires_at: Timestamp,
    pub used: bool,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ProvisioningTokenRecord {
    /// Derived lifecycle status. `used` wins over `expired`.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> TokenStatus {
        if self.used {
            TokenStatus::Used
        } else if now > self.expires_at {
            TokenStatus::Expired
        } else {
            TokenStatus::Active
        }
    }
}

/// Lifecycle status of a token, derived from `used` + `expires_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Active,
    Used,
    Expired,
}

impl TokenStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
