//! Account User Records

use jiff::Timestamp;

use crate::{
    auth::Role,
    domain::{accounts::records::AccountUuid, entities::records::EntityUuid},
    uuids::TypedUuid,
};

/// Account User UUID
pub type AccountUserUuid = TypedUuid<AccountUserRecord>;

/// Account User Record
#[derive(Debug, Clone)]
pub struct AccountUserRecord {
    pub uuid: AccountUserUuid,

    /// `None` exactly when `role` is `SuperAdmin`.
    pub account_uuid: Option<AccountUuid>,

    /// Identity-provider subject. Unique across the whole system.
    pub subject_id: String,

    pub email: String,
    pub display_name: String,

    pub role: Role,

    /// Explicit entity grant list. `None` means all entities of the
    /// account are visible.
    pub entity_uuids: Option<Vec<EntityUuid>>,

    pub is_active: bool,

    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
