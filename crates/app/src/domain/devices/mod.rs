//! Registered mobile devices, keyed by hardware id within an entity.

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
