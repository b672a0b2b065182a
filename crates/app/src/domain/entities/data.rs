//! Entity input data.

use rand::{RngCore, rngs::OsRng};

use crate::domain::entities::{records::EntityUuid, settings::EntitySettings};

/// Data required to create an entity. `storage_id` is minted by the
/// service.
#[derive(Debug, Clone)]
pub struct NewEntity {
    pub uuid: EntityUuid,
    pub entity_name: String,
    pub entity_full_name: String,
    pub settings: EntitySettings,
}

/// Full-replace update for an entity.
#[derive(Debug, Clone)]
pub struct EntityUpdate {
    pub entity_full_name: String,
    pub settings: EntitySettings,
    pub is_active: bool,
}

/// Mints an opaque storage identifier for an entity.
#[must_use]
pub fn generate_entity_storage_id() -> String {
    let mut buf = [0u8; 8];
    OsRng.fill_bytes(&mut buf);

    let mut out = String::with_capacity(4 + buf.len() * 2);
    out.push_str("ent_");
    for byte in buf {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}
