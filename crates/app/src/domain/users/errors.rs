//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("a user with this subject already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("super admins must not be bound to an account")]
    SuperAdminMustBeAccountless,

    #[error("this role requires an account")]
    AccountRequired,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl UsersServiceError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "USER_ALREADY_EXISTS",
            Self::NotFound => "USER_NOT_FOUND",
            Self::SuperAdminMustBeAccountless | Self::AccountRequired => "INVALID_ROLE_SCOPE",
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
            Self::NotFound => 404,
            Self::SuperAdminMustBeAccountless
            | Self::AccountRequired
            | Self::MissingRequiredData
            | Self::InvalidData => 400,
            Self::Auth(err) => err.http_status(),
            Self::Sql(_) => 500,
        }
    }
}

impl From<Error> for UsersServiceError {
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
