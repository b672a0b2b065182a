//! Device provisioning tokens.
//!
//! An admin issues a single-use token for an entity; the token travels
//! to a device as a deep link or as a human-typable activation code, and
//! the device redeems it to learn which entity to configure itself for.

pub mod code;
pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
