//! Accounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("account already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl AccountsServiceError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            Self::NotFound => "ACCOUNT_NOT_FOUND",
            Self::MissingRequiredData => "MISSING_REQUIRED_DATA",
            Self::InvalidData => "INVALID_DATA",
            Self::Auth(err) => err.code(),
            Self::Sql(_) => "STORAGE_ERROR",
        }
    }

    /// HTTP status an outer transport layer should map this to.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::AlreadyExists => 409,
            Self::NotFound => 404,
            Self::MissingRequiredData | Self::InvalidData => 400,
            Self::Auth(err) => err.http_status(),
            Self::Sql(_) => 500,
        }
    }
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
