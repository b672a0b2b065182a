//! Provisioning input and output data.

use crate::domain::{
    entities::records::EntityUuid,
    provisioning::records::{ProvisioningTokenRecord, TokenStatus},
};

/// A freshly issued token plus its deep link, returned exactly once.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub record: ProvisioningTokenRecord,
    pub deep_link: String,
}

/// Redemption request. Exactly one of the two lookup keys must be set.
#[derive(Debug, Clone, Default)]
pub struct RedeemRequest {
    pub token: Option<String>,
    pub activation_code: Option<String>,
}

/// What a device learns by redeeming a token.
#[derive(Debug, Clone)]
pub struct ProvisionedEntity {
    pub entity_uuid: EntityUuid,
    pub entity_name: String,
    /// Full display name, when the entity still exists.
    pub entity_full_name: Option<String>,
}

/// Optional filter for token listings, matching the derived status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(TokenStatus),
}

impl StatusFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}
