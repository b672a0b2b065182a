//! Entities: the operational units (sites, branches) under an account.
//!
//! Every tenant-scoped row in the system carries an `entity_uuid`
//! discriminator pointing here.

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
pub mod settings;
