//! Workforce members who check in and out from the mobile app. They
//! authenticate with badge number and access key, never through the
//! identity provider.

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
