//! Account user input data.

use crate::{
    auth::Role,
    domain::{
        accounts::records::AccountUuid,
        entities::records::EntityUuid,
        users::records::AccountUserUuid,
    },
};

/// Data required to create an administrative user.
#[derive(Debug, Clone)]
pub struct NewAccountUser {
    pub uuid: AccountUserUuid,
    pub account_uuid: Option<AccountUuid>,
    pub subject_id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    /// Empty means "all entities of the account".
    pub entity_uuids: Vec<EntityUuid>,
}

/// Full-replace update for an administrative user. The subject binding
/// is immutable.
#[derive(Debug, Clone)]
pub struct AccountUserUpdate {
    pub account_uuid: Option<AccountUuid>,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub entity_uuids: Vec<EntityUuid>,
    pub is_active: bool,
}
