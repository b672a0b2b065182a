//! Resolved caller identity.

use std::{fmt, str::FromStr};

use crate::domain::{accounts::records::AccountUuid, entities::records::EntityUuid};

/// Header carrying an account-level API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying a bearer token.
pub const AUTHORIZATION_HEADER: &str = "authorization";

const BEARER_PREFIX: &str = "Bearer ";

/// Caller role, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    AccountAdmin,
    EntityAdmin,
    EntityUser,
    /// Account-level shared-secret credential (service channel).
    ApiKey,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::AccountAdmin => "account_admin",
            Self::EntityAdmin => "entity_admin",
            Self::EntityUser => "entity_user",
            Self::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Self::SuperAdmin),
            "account_admin" => Ok(Self::AccountAdmin),
            "entity_admin" => Ok(Self::EntityAdmin),
            "entity_user" => Ok(Self::EntityUser),
            "api_key" => Ok(Self::ApiKey),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// The set of entities a principal may touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityScope {
    /// Every entity the principal's account owns (wildcard for super admin).
    All,

    /// An explicit allow-list.
    Selected(Vec<EntityUuid>),
}

impl EntityScope {
    #[must_use]
    pub fn allows(&self, entity: EntityUuid) -> bool {
        match self {
            Self::All => true,
            Self::Selected(entities) => entities.contains(&entity),
        }
    }
}

/// Device identity carried by mobile-channel tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBinding {
    pub hardware_id: String,
    pub entity_uuid: EntityUuid,
}

/// Normalized authenticated identity, constructed fresh per request and
/// never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Provider-issued subject id, employee code, or account id.
    pub subject: String,

    pub role: Role,

    /// `None` only for super admins.
    pub account_uuid: Option<AccountUuid>,

    pub entity_scope: EntityScope,

    /// Present only for mobile tokens minted against a registered device.
    pub device: Option<DeviceBinding>,
}

impl Principal {
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// The two headers the credential resolver inspects, extracted from the
/// raw header set in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders {
    pub api_key: Option<String>,
    pub bearer: Option<String>,
}

impl AuthHeaders {
    /// Extract the relevant headers from raw (name, value) pairs.
    ///
    /// Header names match case-insensitively; the bearer value is the
    /// `Authorization` payload with its `Bearer ` prefix stripped. An
    /// `Authorization` header without that prefix is ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut headers = Self::default();

        for (name, value) in pairs {
            if name.eq_ignore_ascii_case(API_KEY_HEADER) {
                headers.api_key = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(AUTHORIZATION_HEADER) {
                headers.bearer = value.strip_prefix(BEARER_PREFIX).map(str::to_string);
            }
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_extracts_both_headers() {
        let headers = AuthHeaders::from_pairs([
            ("X-Api-Key", "secret"),
            ("Authorization", "Bearer abc.def"),
            ("Content-Type", "application/json"),
        ]);

        assert_eq!(headers.api_key.as_deref(), Some("secret"));
        assert_eq!(headers.bearer.as_deref(), Some("abc.def"));
    }

    #[test]
    fn from_pairs_ignores_authorization_without_bearer_prefix() {
        let headers = AuthHeaders::from_pairs([("authorization", "Basic dXNlcjpwYXNz")]);

        assert_eq!(headers.bearer, None);
    }

    #[test]
    fn entity_scope_selected_rejects_other_entities() {
        let allowed = EntityUuid::new();
        let scope = EntityScope::Selected(vec![allowed]);

        assert!(scope.allows(allowed));
        assert!(!scope.allows(EntityUuid::new()));
        assert!(EntityScope::All.allows(EntityUuid::new()));
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [
            Role::SuperAdmin,
            Role::AccountAdmin,
            Role::EntityAdmin,
            Role::EntityUser,
            Role::ApiKey,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }

        assert!("admin".parse::<Role>().is_err());
    }
}
