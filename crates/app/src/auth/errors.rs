//! Authentication and authorization failures.

use thiserror::Error;

use crate::{
    auth::{identity::IdentityError, principal::Role},
    domain::accounts::records::AccountUuid,
};

/// Failure taxonomy for the credential resolver and the authorization
/// gates. Every variant carries a stable machine-readable code and an
/// HTTP status; messages never include stack traces.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication credential required")]
    MissingCredential,

    #[error("invalid authentication credential")]
    InvalidCredential,

    #[error("expired authentication credential")]
    ExpiredCredential,

    #[error("account is inactive")]
    AccountInactive,

    #[error("user not found or inactive")]
    UserNotFoundOrInactive,

    /// Authenticated but insufficient role or ownership. Surfaces the
    /// caller's actual role and account so clients see why, never a
    /// silent no-op.
    #[error("role '{role}' may not perform this operation")]
    Forbidden {
        role: Role,
        account_uuid: Option<AccountUuid>,
        required: &'static [Role],
    },

    /// The calling device is not operational. Deliberately mapped to
    /// HTTP 400: intermediary proxies rewrite 403 bodies, and the mobile
    /// client must see this code to force a logout.
    #[error("device is not active (status '{status}')")]
    DeviceInactive { status: String },

    #[error("identity provider unavailable")]
    Identity(#[source] IdentityError),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl AuthError {
    /// Stable machine-readable code for error payloads.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::ExpiredCredential => "EXPIRED_CREDENTIAL",
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::UserNotFoundOrInactive => "USER_NOT_FOUND_OR_INACTIVE",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::DeviceInactive { .. } => "DEVICE_INACTIVE",
            Self::Identity(_) | Self::Sql(_) => "DEPENDENCY_ERROR",
        }
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingCredential | Self::InvalidCredential | Self::ExpiredCredential => 401,
            Self::AccountInactive | Self::UserNotFoundOrInactive | Self::Forbidden { .. } => 403,
            Self::DeviceInactive { .. } => 400,
            Self::Identity(_) | Self::Sql(_) => 500,
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
