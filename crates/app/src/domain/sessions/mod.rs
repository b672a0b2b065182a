//! Shift sessions: the append-only assignment log plus the denormalized
//! last-session projection, kept consistent by writing both inside one
//! transaction.

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;
