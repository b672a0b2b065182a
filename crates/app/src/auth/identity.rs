//! Identity provider token verification (web channel).

use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::IdentityProviderConfig;

/// Subject information extracted from a verified provider token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdToken {
    /// Provider-issued unique subject id.
    pub subject: String,

    pub email: Option<String>,
}

/// Errors from the identity provider round-trip.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider examined the token and rejected it.
    #[error("identity provider rejected the token: {message}")]
    Rejected { message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}

impl IdentityError {
    /// Whether the rejection was specifically an expired token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Rejected { message } if message.contains("TOKEN_EXPIRED"))
    }
}

/// Verification seam so the resolver can be exercised without network
/// access.
#[automock]
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify signature and expiry of a provider-issued ID token.
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdToken, IdentityError>;
}

/// HTTP client for the Google Identity Toolkit `accounts:lookup` call.
#[derive(Debug, Clone)]
pub struct IdentityToolkitClient {
    config: IdentityProviderConfig,
    http: Client,
}

impl IdentityToolkitClient {
    #[must_use]
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for IdentityToolkitClient {
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdToken, IdentityError> {
        let url = format!(
            "{}/v1/accounts:lookup?key={}",
            self.config.endpoint, self.config.api_key
        );

        let body = serde_json::json!({ "idToken": id_token });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if status.is_client_error() {
            let parsed: ErrorResponse = response.json().await?;

            return Err(IdentityError::Rejected {
                message: parsed.error.message,
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(IdentityError::UnexpectedResponse(format!(
                "lookup failed with status {status}: {text}"
            )));
        }

        let parsed: LookupResponse = response.json().await?;

        let user = parsed
            .users
            .into_iter()
            .next()
            .ok_or(IdentityError::Rejected {
                message: "INVALID_ID_TOKEN".to_string(),
            })?;

        Ok(VerifiedIdToken {
            subject: user.local_id,
            email: user.email,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
