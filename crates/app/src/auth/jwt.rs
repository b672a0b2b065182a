//! Locally-issued mobile-channel JWTs (HS256).

use jiff::{Timestamp, ToSpan as _};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::records::EntityUuid;

/// Mobile tokens expire 24 hours after issuance.
pub const MOBILE_TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by a locally-issued mobile token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MobileClaims {
    /// Employee code.
    pub sub: String,

    /// Badge (login) number.
    pub badge: String,

    /// Employee profile/role string.
    pub profile: String,

    /// Entity the employee belongs to.
    pub entity: Uuid,

    /// Hardware id of the device the login came from; absent for logins
    /// that did not report one (legacy clients).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    pub iat: i64,
    pub exp: i64,
}

impl MobileClaims {
    #[must_use]
    pub fn new(
        employee_code: String,
        badge: String,
        profile: String,
        entity: EntityUuid,
        device: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        // Hour spans are absolute time, so this addition cannot fail for
        // any representable `now`.
        let exp = now + MOBILE_TOKEN_TTL_HOURS.hours();

        Self {
            sub: employee_code,
            badge,
            profile,
            entity: entity.into_uuid(),
            device,
            iat: now.as_second(),
            exp: exp.as_second(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("token invalid")]
    Invalid,
}

/// Encoder/decoder bound to the deployment's HMAC secret.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtCodec(**redacted**)")
    }
}

impl JwtCodec {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a signed token for the given claims.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Invalid`] if signing fails.
    pub fn encode(&self, claims: &MobileClaims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| JwtError::Invalid)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// [`JwtError::Expired`] past the `exp` claim, [`JwtError::Invalid`]
    /// for any other verification failure.
    pub fn decode(&self, token: &str) -> Result<MobileClaims, JwtError> {
        decode::<MobileClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid,
            })
    }
}
