//! Entity Records

use jiff::Timestamp;

use crate::{
    domain::{accounts::records::AccountUuid, entities::settings::EntitySettings},
    uuids::TypedUuid,
};

/// Entity UUID
pub type EntityUuid = TypedUuid<EntityRecord>;

/// Entity Record
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub uuid: EntityUuid,

    /// Owning account.
    pub account_uuid: AccountUuid,

    /// Short name, also the seed for activation-code prefixes.
    pub entity_name: String,

    /// Display name shown to end users.
    pub entity_full_name: String,

    /// Opaque identifier used in object-storage paths, unique per account.
    pub storage_id: String,

    pub settings: EntitySettings,

    pub is_active: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EntityRecord {
    /// Builds the canonical object-storage path for an object under this
    /// entity: `accounts/{account}/entities/{entity}/{object}`.
    #[must_use]
    pub fn storage_object_path(&self, account_storage_id: &str, object: &str) -> String {
        format!(
            "accounts/{account_storage_id}/entities/{entity}/{object}",
            entity = self.storage_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(storage_id: &str) -> EntityRecord {
        EntityRecord {
            uuid: EntityUuid::new(),
            account_uuid: AccountUuid::new(),
            entity_name: "Sab".to_string(),
            entity_full_name: "Sab Security".to_string(),
            storage_id: storage_id.to_string(),
            settings: EntitySettings::default(),
            is_active: true,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn storage_path_nests_entity_under_account() {
        let entity = record("ent_0a1b2c3d");

        assert_eq!(
            entity.storage_object_path("acc_11223344", "branding/logo.png"),
            "accounts/acc_11223344/entities/ent_0a1b2c3d/branding/logo.png"
        );
    }
}
