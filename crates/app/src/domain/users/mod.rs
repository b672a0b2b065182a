//! Administrative users, keyed by their external identity-provider
//! subject. Super admins are account-less; every other role is bound to
//! exactly one account.

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
