//! Devices service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum DevicesServiceError {
    #[error("device already registered for this entity")]
    AlreadyRegistered,

    #[error("device not found")]
    NotFound,

    #[error("entity not found")]
    EntityNotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl DevicesServiceError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "DEVICE_ALREADY_REGISTERED",
            Self::NotFound => "DEVICE_NOT_FOUND",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::MissingRequiredData => "MISSING_REQUIRED_DATA",
            Self::InvalidData => "INVALID_DATA",
            Self::Auth(err) => err.code(),
            Self::Sql(_) => "STORAGE_ERROR",
        }
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::AlreadyRegistered => 409,
            Self::NotFound | Self::EntityNotFound => 404,
            Self::MissingRequiredData | Self::InvalidData => 400,
            Self::Auth(err) => err.http_status(),
            Self::Sql(_) => 500,
        }
    }
}

impl From<Error> for DevicesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyRegistered,
            Some(ErrorKind::ForeignKeyViolation) => Self::EntityNotFound,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
