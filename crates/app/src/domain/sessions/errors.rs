//! Sessions service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    #[error("missing required data")]
    MissingRequiredData,

    #[error("session not found")]
    NotFound,

    /// Any failure inside the check-in/check-out transaction. The
    /// transaction rolled back; neither table changed.
    #[error("session transaction failed")]
    Transaction(#[source] Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl SessionsServiceError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredData => "MISSING_REQUIRED_DATA",
            Self::NotFound => "SESSION_NOT_FOUND",
            Self::Transaction(_) => "TRANSACTION_FAILED",
            Self::Auth(err) => err.code(),
            Self::Sql(_) => "STORAGE_ERROR",
        }
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingRequiredData => 400,
            Self::NotFound => 404,
            Self::Transaction(_) | Self::Sql(_) => 500,
            Self::Auth(err) => err.http_status(),
        }
    }
}

impl From<Error> for SessionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
