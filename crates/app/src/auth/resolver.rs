//! Credential resolver: raw headers in, [`Principal`] out.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::{
        errors::AuthError,
        identity::{IdentityError, TokenVerifier},
        jwt::{JwtCodec, JwtError},
        principal::{AuthHeaders, DeviceBinding, EntityScope, Principal, Role},
        repository::{PgAuthRepository, SubjectUser},
    },
    domain::entities::records::EntityUuid,
};

/// The single bearer verification path active in this deployment.
///
/// Chosen once at startup; a request never falls back from one variant to
/// the other.
#[derive(Clone)]
pub enum BearerAuthenticator {
    /// External identity provider + account-user lookup (web channel).
    IdentityProvider(Arc<dyn TokenVerifier>),

    /// Locally-issued HS256 JWTs (mobile channel).
    LocalJwt(Arc<JwtCodec>),
}

impl std::fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentityProvider(_) => f.write_str("BearerAuthenticator::IdentityProvider"),
            Self::LocalJwt(_) => f.write_str("BearerAuthenticator::LocalJwt"),
        }
    }
}

/// Picks exactly one authentication scheme per request and produces a
/// normalized [`Principal`].
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    repository: PgAuthRepository,
    bearer: BearerAuthenticator,
}

impl CredentialResolver {
    #[must_use]
    pub fn new(pool: PgPool, bearer: BearerAuthenticator) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            bearer,
        }
    }

    /// Resolve the caller's credential.
    ///
    /// An API key header is authoritative: when present, the bearer header
    /// is ignored entirely. With neither header the request is rejected
    /// with `MISSING_CREDENTIAL`.
    ///
    /// # Errors
    ///
    /// Any [`AuthError`] variant from the resolver taxonomy.
    pub async fn resolve(&self, headers: &AuthHeaders) -> Result<Principal, AuthError> {
        if let Some(api_key) = headers.api_key.as_deref() {
            return self.resolve_api_key(api_key).await;
        }

        if let Some(bearer) = headers.bearer.as_deref() {
            return match &self.bearer {
                BearerAuthenticator::IdentityProvider(verifier) => {
                    self.resolve_identity_token(verifier.as_ref(), bearer).await
                }
                BearerAuthenticator::LocalJwt(codec) => Self::resolve_mobile_jwt(codec, bearer),
            };
        }

        Err(AuthError::MissingCredential)
    }

    async fn resolve_api_key(&self, api_key: &str) -> Result<Principal, AuthError> {
        let account = self
            .repository
            .find_account_by_api_key(api_key)
            .await?
            .ok_or(AuthError::InvalidCredential)?;

        if !account.is_active {
            return Err(AuthError::AccountInactive);
        }

        Ok(Principal {
            subject: account.uuid.to_string(),
            role: Role::ApiKey,
            account_uuid: Some(account.uuid),
            entity_scope: EntityScope::All,
            device: None,
        })
    }

    async fn resolve_identity_token(
        &self,
        verifier: &dyn TokenVerifier,
        bearer: &str,
    ) -> Result<Principal, AuthError> {
        let verified = verifier
            .verify_id_token(bearer)
            .await
            .map_err(map_identity_error)?;

        let user = self
            .repository
            .find_user_by_subject(&verified.subject)
            .await?
            .ok_or(AuthError::UserNotFoundOrInactive)?;

        if !user.is_active {
            return Err(AuthError::UserNotFoundOrInactive);
        }

        let principal = principal_for_user(&user)?;

        // Best-effort; a failed timestamp write never fails the request.
        if let Err(error) = self.repository.touch_last_login(user.uuid).await {
            tracing::warn!(user = %user.uuid, %error, "failed to record login timestamp");
        }

        Ok(principal)
    }

    fn resolve_mobile_jwt(codec: &JwtCodec, bearer: &str) -> Result<Principal, AuthError> {
        let claims = codec.decode(bearer).map_err(|error| match error {
            JwtError::Expired => AuthError::ExpiredCredential,
            JwtError::Invalid => AuthError::InvalidCredential,
        })?;

        let entity = EntityUuid::from_uuid(claims.entity);

        Ok(Principal {
            subject: claims.sub,
            role: Role::EntityUser,
            account_uuid: None,
            entity_scope: EntityScope::Selected(vec![entity]),
            device: claims.device.map(|hardware_id| DeviceBinding {
                hardware_id,
                entity_uuid: entity,
            }),
        })
    }
}

fn principal_for_user(user: &SubjectUser) -> Result<Principal, AuthError> {
    let role: Role = user
        .role
        .parse()
        .map_err(|_| AuthError::UserNotFoundOrInactive)?;

    if role != Role::SuperAdmin {
        // Bound account must exist and be active.
        if user.account_is_active != Some(true) {
            return Err(AuthError::AccountInactive);
        }
    }

    let entity_scope = match &user.entity_uuids {
        Some(entities) if !entities.is_empty() => EntityScope::Selected(entities.clone()),
        _ => EntityScope::All,
    };

    Ok(Principal {
        subject: user.subject_id.clone(),
        role,
        account_uuid: user.account_uuid,
        entity_scope,
        device: None,
    })
}

fn map_identity_error(error: IdentityError) -> AuthError {
    match &error {
        IdentityError::Rejected { .. } if error.is_expired() => AuthError::ExpiredCredential,
        IdentityError::Rejected { .. } => AuthError::InvalidCredential,
        IdentityError::Http(_) | IdentityError::UnexpectedResponse(_) => {
            AuthError::Identity(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::{identity::MockTokenVerifier, jwt::MobileClaims},
        domain::{
            accounts::{records::AccountUuid, service::AccountsService},
            users::records::AccountUserUuid,
        },
        test::{TestContext, account_update, new_account},
    };

    fn resolver_for(ctx: &TestContext) -> CredentialResolver {
        CredentialResolver::new(
            ctx.db.pool().clone(),
            BearerAuthenticator::LocalJwt(Arc::clone(&ctx.jwt)),
        )
    }

    fn subject_user(role: &str, account_active: Option<bool>) -> SubjectUser {
        SubjectUser {
            uuid: AccountUserUuid::new(),
            subject_id: "uid-1".to_string(),
            role: role.to_string(),
            account_uuid: if role == "super_admin" {
                None
            } else {
                Some(AccountUuid::new())
            },
            entity_uuids: None,
            is_active: true,
            account_is_active: account_active,
        }
    }

    #[test]
    fn super_admin_skips_account_active_check() {
        let principal = principal_for_user(&subject_user("super_admin", None)).unwrap();

        assert!(principal.is_super_admin());
        assert_eq!(principal.account_uuid, None);
        assert_eq!(principal.entity_scope, EntityScope::All);
    }

    #[test]
    fn inactive_account_blocks_non_super_admin() {
        let result = principal_for_user(&subject_user("account_admin", Some(false)));

        assert!(matches!(result, Err(AuthError::AccountInactive)));
    }

    #[test]
    fn explicit_entity_list_becomes_selected_scope() {
        let mut user = subject_user("entity_admin", Some(true));
        let entity = EntityUuid::new();
        user.entity_uuids = Some(vec![entity]);

        let principal = principal_for_user(&user).unwrap();

        assert_eq!(principal.entity_scope, EntityScope::Selected(vec![entity]));
    }

    #[test]
    fn mobile_jwt_resolves_to_device_bound_principal() {
        let codec = JwtCodec::new(b"resolver-test-secret");
        let entity = EntityUuid::new();

        let claims = MobileClaims::new(
            "E-7".to_string(),
            "1234".to_string(),
            "vigilador".to_string(),
            entity,
            Some("hw-42".to_string()),
        );
        let token = codec.encode(&claims).unwrap();

        let principal = CredentialResolver::resolve_mobile_jwt(&codec, &token).unwrap();

        assert_eq!(principal.subject, "E-7");
        assert_eq!(principal.role, Role::EntityUser);
        assert_eq!(
            principal.device,
            Some(DeviceBinding {
                hardware_id: "hw-42".to_string(),
                entity_uuid: entity,
            })
        );
        assert!(principal.entity_scope.allows(entity));
    }

    #[test]
    fn garbage_mobile_jwt_is_invalid_credential() {
        let codec = JwtCodec::new(b"resolver-test-secret");

        let result = CredentialResolver::resolve_mobile_jwt(&codec, "not.a.jwt");

        assert!(matches!(result, Err(AuthError::InvalidCredential)));
    }

    #[tokio::test]
    async fn provider_expiry_maps_to_expired_credential() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_id_token().returning(|_| {
            Err(IdentityError::Rejected {
                message: "TOKEN_EXPIRED".to_string(),
            })
        });

        let error = map_identity_error(
            verifier
                .verify_id_token("stale")
                .await
                .expect_err("mock rejects"),
        );

        assert!(matches!(error, AuthError::ExpiredCredential));
    }

    #[tokio::test]
    async fn missing_both_headers_is_missing_credential() {
        let ctx = TestContext::new().await;
        let resolver = resolver_for(&ctx);

        let result = resolver.resolve(&AuthHeaders::default()).await;

        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[tokio::test]
    async fn api_key_wins_when_both_headers_are_present() -> TestResult {
        let ctx = TestContext::new().await;
        let resolver = resolver_for(&ctx);

        let created = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("Keyed Account"))
            .await?;

        let claims = MobileClaims::new(
            "E-1".to_string(),
            "100".to_string(),
            "vigilador".to_string(),
            ctx.entity_uuid,
            None,
        );
        let bearer = ctx.jwt.encode(&claims)?;

        let principal = resolver
            .resolve(&AuthHeaders {
                api_key: Some(created.api_key.to_string()),
                bearer: Some(bearer),
            })
            .await?;

        assert_eq!(principal.role, Role::ApiKey);
        assert_eq!(principal.account_uuid, Some(created.account.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_api_key_is_invalid_credential() {
        let ctx = TestContext::new().await;
        let resolver = resolver_for(&ctx);

        let result = resolver
            .resolve(&AuthHeaders {
                api_key: Some("not-a-key".to_string()),
                bearer: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredential)));
    }

    #[tokio::test]
    async fn deactivated_account_api_key_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let resolver = resolver_for(&ctx);

        let created = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("Doomed Account"))
            .await?;

        let mut update = account_update(&created.account);
        update.is_active = false;
        ctx.accounts
            .update_account(&ctx.super_admin, created.account.uuid, update)
            .await?;

        let result = resolver
            .resolve(&AuthHeaders {
                api_key: Some(created.api_key.to_string()),
                bearer: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::AccountInactive)));

        Ok(())
    }
}
