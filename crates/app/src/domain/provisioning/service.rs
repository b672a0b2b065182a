//! Provisioning service.

use async_trait::async_trait;
use jiff::{Timestamp, ToSpan};
use mockall::automock;

use crate::{
    auth::{Principal, gate},
    database::Db,
    domain::{
        entities::records::EntityUuid,
        provisioning::{
            code::{
                TOKEN_TTL_HOURS, deep_link, generate_activation_code,
                generate_provisioning_token,
            },
            data::{IssuedToken, ProvisionedEntity, RedeemRequest, StatusFilter},
            errors::ProvisioningServiceError,
            records::{ProvisioningTokenRecord, ProvisioningTokenUuid, TokenStatus},
            repository::{LookupKey, PgProvisioningRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProvisioningService {
    repository: PgProvisioningRepository,
}

impl PgProvisioningService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: PgProvisioningRepository::new(db.pool().clone()),
        }
    }
}

#[async_trait]
impl ProvisioningService for PgProvisioningService {
    async fn create_token(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<IssuedToken, ProvisioningServiceError> {
        let target = self
            .repository
            .get_entity(entity)
            .await?
            .ok_or(ProvisioningServiceError::EntityNotFound)?;

        if !target.is_active {
            return Err(ProvisioningServiceError::EntityInactive);
        }

        gate::require_write(principal)?;
        gate::require_entity_access(principal, entity)?;

        let token = generate_provisioning_token();
        let activation_code = generate_activation_code(&target.entity_name);
        let expires_at = Timestamp::now() + TOKEN_TTL_HOURS.hours();

        let record = self
            .repository
            .create_token(
                ProvisioningTokenUuid::new(),
                &token,
                &activation_code,
                entity,
                &target.entity_name,
                expires_at,
            )
            .await?;

        let deep_link = deep_link(&record.token);

        Ok(IssuedToken { record, deep_link })
    }

    async fn redeem_token(
        &self,
        request: RedeemRequest,
    ) -> Result<ProvisionedEntity, ProvisioningServiceError> {
        let (key, value) = match (&request.token, &request.activation_code) {
            (Some(token), None) => (LookupKey::Token, token.as_str()),
            (None, Some(code)) => (LookupKey::ActivationCode, code.as_str()),
            _ => return Err(ProvisioningServiceError::MissingLookupKey),
        };

        let found = self
            .repository
            .find_token(key, value)
            .await?
            .ok_or(ProvisioningServiceError::TokenNotFound)?;

        // not-found, then used, then expired; the order is observable.
        match found.record.status(Timestamp::now()) {
            TokenStatus::Used => return Err(ProvisioningServiceError::AlreadyUsed),
            TokenStatus::Expired => return Err(ProvisioningServiceError::Expired),
            TokenStatus::Active => {}
        }

        // Two concurrent redemptions both reach here; the guarded update
        // lets exactly one through.
        let rows_affected = self.repository.mark_used(found.record.uuid).await?;
        if rows_affected == 0 {
            return Err(ProvisioningServiceError::AlreadyUsed);
        }

        Ok(ProvisionedEntity {
            entity_uuid: found.record.entity_uuid,
            entity_name: found.record.entity_name,
            entity_full_name: found.entity_full_name,
        })
    }

    async fn revoke_token(
        &self,
        principal: &Principal,
        token: ProvisioningTokenUuid,
    ) -> Result<(), ProvisioningServiceError> {
        gate::require_write(principal)?;

        let rows_affected = self.repository.delete_token(token).await?;

        if rows_affected == 0 {
            return Err(ProvisioningServiceError::TokenNotFound);
        }

        Ok(())
    }

    async fn list_tokens(
        &self,
        principal: &Principal,
        filter: StatusFilter,
    ) -> Result<Vec<ProvisioningTokenRecord>, ProvisioningServiceError> {
        gate::require_write(principal)?;

        Ok(self.repository.list_tokens(filter).await?)
    }
}

#[automock]
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Issues a single-use token for an active entity, returning the raw
    /// token, its activation code and the deep link exactly once.
    async fn create_token(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<IssuedToken, ProvisioningServiceError>;

    /// Redeems a token by opaque value or activation code.
    /// Unauthenticated: the redeeming device has no credentials yet.
    async fn redeem_token(
        &self,
        request: RedeemRequest,
    ) -> Result<ProvisionedEntity, ProvisioningServiceError>;

    /// Deletes a token before it is redeemed.
    async fn revoke_token(
        &self,
        principal: &Principal,
        token: ProvisioningTokenUuid,
    ) -> Result<(), ProvisioningServiceError>;

    /// Lists tokens, optionally by derived status.
    async fn list_tokens(
        &self,
        principal: &Principal,
        filter: StatusFilter,
    ) -> Result<Vec<ProvisioningTokenRecord>, ProvisioningServiceError>;
}
