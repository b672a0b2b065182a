//! Typed runtime configuration, parsed once at startup.

use std::str::FromStr;

use thiserror::Error;

/// Which verification path bearer tokens take in this deployment.
///
/// Exactly one path is attempted per request; there is no silent fallback
/// between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerMode {
    /// Verify bearer tokens against the external identity provider and
    /// require a matching active account user (web channel).
    IdentityProvider,

    /// Verify bearer tokens as locally-issued HS256 JWTs (mobile channel).
    LocalJwt,
}

#[derive(Debug, Error)]
#[error("unknown bearer mode '{0}', expected 'identity-provider' or 'local-jwt'")]
pub struct ParseBearerModeError(String);

impl FromStr for BearerMode {
    type Err = ParseBearerModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "identity-provider" => Ok(Self::IdentityProvider),
            "local-jwt" => Ok(Self::LocalJwt),
            other => Err(ParseBearerModeError(other.to_string())),
        }
    }
}

/// Identity provider connection settings (web channel).
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// Identity Toolkit base URL, e.g. `"https://identitytoolkit.googleapis.com"`.
    pub endpoint: String,

    /// Project API key passed as a query parameter.
    pub api_key: String,
}

/// Process-wide application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bearer_mode: BearerMode,

    /// HMAC secret for locally-issued mobile JWTs.
    pub jwt_secret: String,

    /// Present when `bearer_mode` is [`BearerMode::IdentityProvider`].
    pub identity_provider: Option<IdentityProviderConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_mode_parses_known_values() {
        assert_eq!(
            "identity-provider".parse::<BearerMode>().unwrap(),
            BearerMode::IdentityProvider
        );
        assert_eq!(
            "local-jwt".parse::<BearerMode>().unwrap(),
            BearerMode::LocalJwt
        );
    }

    #[test]
    fn bearer_mode_rejects_unknown_value() {
        assert!("firebase".parse::<BearerMode>().is_err());
    }
}
