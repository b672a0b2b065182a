//! Provisioning service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum ProvisioningServiceError {
    #[error("entity not found")]
    EntityNotFound,

    #[error("entity is inactive")]
    EntityInactive,

    #[error("token not found")]
    TokenNotFound,

    #[error("token already used")]
    AlreadyUsed,

    #[error("token expired")]
    Expired,

    /// Random collision on the token or code column. Callers retry.
    #[error("token collision")]
    Conflict,

    #[error("exactly one of token or activation code must be provided")]
    MissingLookupKey,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ProvisioningServiceError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::EntityInactive => "ENTITY_INACTIVE",
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::AlreadyUsed => "TOKEN_ALREADY_USED",
            Self::Expired => "TOKEN_EXPIRED",
            Self::Conflict => "DUPLICATE_TOKEN",
            Self::MissingLookupKey => "MISSING_LOOKUP_KEY",
            Self::Auth(err) => err.code(),
            Self::Sql(_) => "STORAGE_ERROR",
        }
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EntityNotFound | Self::TokenNotFound => 404,
            Self::EntityInactive | Self::AlreadyUsed | Self::Expired => 403,
            Self::Conflict => 409,
            Self::MissingLookupKey => 400,
            Self::Auth(err) => err.http_status(),
            Self::Sql(_) => 500,
        }
    }
}

impl From<Error> for ProvisioningServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::TokenNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::EntityNotFound,
            Some(_) | None => Self::Sql(error),
        }
    }
}
