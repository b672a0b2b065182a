//! Application Domain Concerns

pub mod accounts;
pub mod devices;
pub mod employees;
pub mod entities;
pub mod provisioning;
pub mod sessions;
pub mod users;
