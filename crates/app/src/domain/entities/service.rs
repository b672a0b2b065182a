//! Entities service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{Principal, gate},
    database::Db,
    domain::{
        accounts::{records::AccountUuid, repository::PgAccountsRepository},
        entities::{
            data::{EntityUpdate, NewEntity, generate_entity_storage_id},
            errors::EntitiesServiceError,
            records::{EntityRecord, EntityUuid},
            repository::PgEntitiesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgEntitiesService {
    repository: PgEntitiesRepository,
    accounts: PgAccountsRepository,
}

impl PgEntitiesService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: PgEntitiesRepository::new(db.pool().clone()),
            accounts: PgAccountsRepository::new(db.pool().clone()),
        }
    }

    async fn fetch_existing(
        &self,
        entity: EntityUuid,
    ) -> Result<EntityRecord, EntitiesServiceError> {
        self.repository
            .get_entity(entity)
            .await?
            .ok_or(EntitiesServiceError::NotFound)
    }
}

#[async_trait]
impl EntitiesService for PgEntitiesService {
    async fn create_entity(
        &self,
        principal: &Principal,
        account: AccountUuid,
        entity: NewEntity,
    ) -> Result<EntityRecord, EntitiesServiceError> {
        let owner = self
            .accounts
            .get_account(account)
            .await?
            .ok_or(EntitiesServiceError::AccountNotFound)?;

        gate::require_write(principal)?;
        gate::require_account_access(principal, account)?;

        if entity.entity_name.trim().is_empty() {
            return Err(EntitiesServiceError::MissingRequiredData);
        }

        // Quota check happens before the insert. A concurrent create can
        // slip past it; the quota is advisory, not a hard constraint.
        let count = self.repository.count_entities(account).await?;
        if count >= i64::from(owner.max_entities) {
            return Err(EntitiesServiceError::QuotaExceeded {
                max: owner.max_entities,
            });
        }

        let storage_id = generate_entity_storage_id();

        Ok(self
            .repository
            .create_entity(account, entity, storage_id)
            .await?)
    }

    async fn get_entity(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<EntityRecord, EntitiesServiceError> {
        let record = self.fetch_existing(entity).await?;

        gate::require_account_access(principal, record.account_uuid)?;
        gate::require_entity_access(principal, entity)?;

        Ok(record)
    }

    async fn list_entities(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<Vec<EntityRecord>, EntitiesServiceError> {
        gate::require_account_access(principal, account)?;

        let entities = self.repository.list_entities(account).await?;

        // Entity-scoped users only see the entities on their grant list.
        Ok(entities
            .into_iter()
            .filter(|e| principal.is_super_admin() || principal.entity_scope.allows(e.uuid))
            .collect())
    }

    async fn update_entity(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        update: EntityUpdate,
    ) -> Result<EntityRecord, EntitiesServiceError> {
        let record = self.fetch_existing(entity).await?;

        gate::require_write(principal)?;
        gate::require_account_access(principal, record.account_uuid)?;
        gate::require_entity_access(principal, entity)?;

        self.repository
            .update_entity(entity, update)
            .await?
            .ok_or(EntitiesServiceError::NotFound)
    }

    async fn deactivate_entity(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<(), EntitiesServiceError> {
        let record = self.fetch_existing(entity).await?;

        gate::require_write(principal)?;
        gate::require_account_access(principal, record.account_uuid)?;
        gate::require_entity_access(principal, entity)?;

        let rows_affected = self.repository.deactivate_entity(entity).await?;

        if rows_affected == 0 {
            return Err(EntitiesServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EntitiesService: Send + Sync {
    /// Creates an entity under an account, enforcing the account's
    /// `max_entities` quota.
    async fn create_entity(
        &self,
        principal: &Principal,
        account: AccountUuid,
        entity: NewEntity,
    ) -> Result<EntityRecord, EntitiesServiceError>;

    /// Retrieves a single entity within the caller's scope.
    async fn get_entity(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<EntityRecord, EntitiesServiceError>;

    /// Lists the account's entities visible to the caller.
    async fn list_entities(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<Vec<EntityRecord>, EntitiesServiceError>;

    /// Replaces the mutable fields of an entity.
    async fn update_entity(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        update: EntityUpdate,
    ) -> Result<EntityRecord, EntitiesServiceError>;

    /// Soft-disables an entity; its data is preserved.
    async fn deactivate_entity(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<(), EntitiesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::AuthError,
        domain::entities::settings::EntitySettings,
        test::{TestContext, new_entity},
    };

    use super::*;

    #[tokio::test]
    async fn create_entity_mints_storage_id() -> TestResult {
        let ctx = TestContext::new().await;

        let entity = ctx
            .entities
            .create_entity(&ctx.super_admin, ctx.account_uuid, new_entity("North"))
            .await?;

        assert!(entity.storage_id.starts_with("ent_"));
        assert_eq!(entity.account_uuid, ctx.account_uuid);
        assert!(entity.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_entity_unknown_account_returns_account_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .entities
            .create_entity(&ctx.super_admin, AccountUuid::new(), new_entity("North"))
            .await;

        assert!(
            matches!(result, Err(EntitiesServiceError::AccountNotFound)),
            "expected AccountNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_entity_enforces_quota() -> TestResult {
        let ctx = TestContext::new().await;

        // The default test account has max_entities = 2 and already owns
        // one entity.
        ctx.entities
            .create_entity(&ctx.super_admin, ctx.account_uuid, new_entity("Second"))
            .await?;

        let result = ctx
            .entities
            .create_entity(&ctx.super_admin, ctx.account_uuid, new_entity("Third"))
            .await;

        assert!(
            matches!(result, Err(EntitiesServiceError::QuotaExceeded { max: 2 })),
            "expected QuotaExceeded, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn entity_user_cannot_create_entities() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.entity_user(vec![ctx.entity_uuid]);

        let result = ctx
            .entities
            .create_entity(&user, ctx.account_uuid, new_entity("North"))
            .await;

        assert!(
            matches!(
                result,
                Err(EntitiesServiceError::Auth(AuthError::Forbidden { .. }))
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_entity_outside_scope_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;

        let other = ctx
            .entities
            .create_entity(&ctx.super_admin, ctx.account_uuid, new_entity("Other"))
            .await?;

        // Scoped to the default entity only.
        let user = ctx.entity_user(vec![ctx.entity_uuid]);
        let result = ctx.entities.get_entity(&user, other.uuid).await;

        assert!(
            matches!(
                result,
                Err(EntitiesServiceError::Auth(AuthError::Forbidden { .. }))
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_entities_filters_to_scope() -> TestResult {
        let ctx = TestContext::new().await;

        let visible = ctx
            .entities
            .create_entity(&ctx.super_admin, ctx.account_uuid, new_entity("Visible"))
            .await?;

        let user = ctx.entity_user(vec![visible.uuid]);
        let entities = ctx.entities.list_entities(&user, ctx.account_uuid).await?;

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].uuid, visible.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn update_entity_replaces_settings() -> TestResult {
        let ctx = TestContext::new().await;

        let mut settings = EntitySettings::default();
        settings.display.show_logo = true;

        let updated = ctx
            .entities
            .update_entity(
                &ctx.super_admin,
                ctx.entity_uuid,
                EntityUpdate {
                    entity_full_name: "Renamed Branch".to_string(),
                    settings: settings.clone(),
                    is_active: true,
                },
            )
            .await?;

        assert_eq!(updated.entity_full_name, "Renamed Branch");
        assert_eq!(updated.settings, settings);

        Ok(())
    }

    #[tokio::test]
    async fn deactivate_entity_preserves_the_row() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.entities
            .deactivate_entity(&ctx.super_admin, ctx.entity_uuid)
            .await?;

        let entity = ctx
            .entities
            .get_entity(&ctx.super_admin, ctx.entity_uuid)
            .await?;

        assert!(!entity.is_active);

        Ok(())
    }
}
