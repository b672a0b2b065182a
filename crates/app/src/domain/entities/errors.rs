//! Entities service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum EntitiesServiceError {
    #[error("entity already exists")]
    AlreadyExists,

    #[error("entity not found")]
    NotFound,

    #[error("account not found")]
    AccountNotFound,

    #[error("account entity quota exceeded (max {max})")]
    QuotaExceeded { max: i32 },

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl EntitiesServiceError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ENTITY_ALREADY_EXISTS",
            Self::NotFound => "ENTITY_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::QuotaExceeded { .. } => "ENTITY_QUOTA_EXCEEDED",
            Self::MissingRequiredData => "MISSING_REQUIRED_DATA",
            Self::InvalidData => "INVALID_DATA",
            Self::Auth(err) => err.code(),
            Self::Sql(_) => "STORAGE_ERROR",
        }
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::AlreadyExists => 409,
            Self::NotFound | Self::AccountNotFound => 404,
            Self::QuotaExceeded { .. } => 403,
            Self::MissingRequiredData | Self::InvalidData => 400,
            Self::Auth(err) => err.http_status(),
            Self::Sql(_) => 500,
        }
    }
}

impl From<Error> for EntitiesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::AccountNotFound,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
