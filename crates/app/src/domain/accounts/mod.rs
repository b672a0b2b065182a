//! Billing accounts, the top-level tenancy boundary.
//!
//! Every entity, user and device hangs off an account. Accounts own the
//! API key used for machine-to-machine access and the `max_entities`
//! quota enforced when entities are created.

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
