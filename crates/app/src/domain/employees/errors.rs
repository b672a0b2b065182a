//! Employees service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{AuthError, JwtError, PasswordError};

#[derive(Debug, Error)]
pub enum EmployeesServiceError {
    #[error("employee already registered for this entity")]
    AlreadyRegistered,

    #[error("employee not found")]
    NotFound,

    /// Wrong access key. Deliberately the same shape as an unknown badge
    /// from the caller's perspective at the transport layer.
    #[error("invalid credentials")]
    InvalidCredential,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("access key hashing failed")]
    Password(#[from] PasswordError),

    #[error("token minting failed")]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl EmployeesServiceError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "EMPLOYEE_ALREADY_REGISTERED",
            Self::NotFound => "EMPLOYEE_NOT_FOUND",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::MissingRequiredData => "MISSING_REQUIRED_DATA",
            Self::InvalidData => "INVALID_DATA",
            Self::Password(_) | Self::Jwt(_) => "DEPENDENCY_ERROR",
            Self::Auth(err) => err.code(),
            Self::Sql(_) => "STORAGE_ERROR",
        }
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::AlreadyRegistered => 409,
            Self::NotFound => 404,
            Self::InvalidCredential => 401,
            Self::MissingRequiredData | Self::InvalidData => 400,
            Self::Password(_) | Self::Jwt(_) | Self::Sql(_) => 500,
            Self::Auth(err) => err.http_status(),
        }
    }
}

impl From<Error> for EmployeesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyRegistered,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
