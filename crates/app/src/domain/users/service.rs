//! Account users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{Principal, Role, gate},
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        users::{
            data::{AccountUserUpdate, NewAccountUser},
            errors::UsersServiceError,
            records::{AccountUserRecord, AccountUserUuid},
            repository::PgUsersRepository,
        },
    },
};

/// Checks the role/account invariant shared by create and update.
///
/// `ApiKey` is a resolver-synthesized role, never a stored one.
fn check_role_scope(
    role: Role,
    account_uuid: Option<AccountUuid>,
) -> Result<(), UsersServiceError> {
    match role {
        Role::ApiKey => Err(UsersServiceError::InvalidData),
        Role::SuperAdmin if account_uuid.is_some() => {
            Err(UsersServiceError::SuperAdminMustBeAccountless)
        }
        Role::SuperAdmin => Ok(()),
        _ if account_uuid.is_none() => Err(UsersServiceError::AccountRequired),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: PgUsersRepository::new(db.pool().clone()),
        }
    }

    async fn fetch_existing(
        &self,
        user: AccountUserUuid,
    ) -> Result<AccountUserRecord, UsersServiceError> {
        self.repository
            .get_user(user)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(
        &self,
        principal: &Principal,
        user: NewAccountUser,
    ) -> Result<AccountUserRecord, UsersServiceError> {
        gate::require_write(principal)?;

        // Elevation guard runs before any write touches the database.
        gate::require_role_assignable(principal, user.role)?;
        check_role_scope(user.role, user.account_uuid)?;

        if let Some(account) = user.account_uuid {
            gate::require_account_access(principal, account)?;
        } else {
            gate::require_super_admin(principal)?;
        }

        if user.subject_id.trim().is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        Ok(self.repository.create_user(user).await?)
    }

    async fn get_user(
        &self,
        principal: &Principal,
        user: AccountUserUuid,
    ) -> Result<AccountUserRecord, UsersServiceError> {
        let record = self.fetch_existing(user).await?;

        if let Some(account) = record.account_uuid {
            gate::require_account_access(principal, account)?;
        } else {
            gate::require_super_admin(principal)?;
        }

        Ok(record)
    }

    async fn list_users(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<Vec<AccountUserRecord>, UsersServiceError> {
        gate::require_account_access(principal, account)?;

        Ok(self.repository.list_users(account).await?)
    }

    async fn update_user(
        &self,
        principal: &Principal,
        user: AccountUserUuid,
        update: AccountUserUpdate,
    ) -> Result<AccountUserRecord, UsersServiceError> {
        let existing = self.fetch_existing(user).await?;

        gate::require_write(principal)?;

        // Guard both the role being assigned and the role being replaced:
        // demoting a super admin is itself an elevation-level change.
        gate::require_role_assignable(principal, update.role)?;
        gate::require_role_assignable(principal, existing.role)?;
        check_role_scope(update.role, update.account_uuid)?;

        if let Some(account) = existing.account_uuid {
            gate::require_account_access(principal, account)?;
        } else {
            gate::require_super_admin(principal)?;
        }
        if let Some(account) = update.account_uuid {
            gate::require_account_access(principal, account)?;
        }

        self.repository
            .update_user(user, update)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }

    async fn delete_user(
        &self,
        principal: &Principal,
        user: AccountUserUuid,
    ) -> Result<(), UsersServiceError> {
        let existing = self.fetch_existing(user).await?;

        gate::require_write(principal)?;
        gate::require_role_assignable(principal, existing.role)?;

        if let Some(account) = existing.account_uuid {
            gate::require_account_access(principal, account)?;
        } else {
            gate::require_super_admin(principal)?;
        }

        let rows_affected = self.repository.delete_user(user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates an administrative user bound to an identity-provider
    /// subject.
    async fn create_user(
        &self,
        principal: &Principal,
        user: NewAccountUser,
    ) -> Result<AccountUserRecord, UsersServiceError>;

    /// Retrieves a single user within the caller's account.
    async fn get_user(
        &self,
        principal: &Principal,
        user: AccountUserUuid,
    ) -> Result<AccountUserRecord, UsersServiceError>;

    /// Lists the users of an account.
    async fn list_users(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<Vec<AccountUserRecord>, UsersServiceError>;

    /// Replaces the mutable fields of a user.
    async fn update_user(
        &self,
        principal: &Principal,
        user: AccountUserUuid,
        update: AccountUserUpdate,
    ) -> Result<AccountUserRecord, UsersServiceError>;

    /// Deletes a user.
    async fn delete_user(
        &self,
        principal: &Principal,
        user: AccountUserUuid,
    ) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::AuthError,
        test::{TestContext, new_account_user},
    };

    use super::*;

    #[tokio::test]
    async fn create_user_persists_grant_list() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(
                &ctx.super_admin,
                NewAccountUser {
                    entity_uuids: vec![ctx.entity_uuid],
                    ..new_account_user(ctx.account_uuid, Role::EntityUser, "subject-1")
                },
            )
            .await?;

        assert_eq!(user.role, Role::EntityUser);
        assert_eq!(user.entity_uuids.as_deref(), Some(&[ctx.entity_uuid][..]));
        assert!(user.is_active);
        assert!(user.last_login_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn empty_grant_list_is_stored_as_all_entities() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(
                &ctx.super_admin,
                new_account_user(ctx.account_uuid, Role::AccountAdmin, "subject-2"),
            )
            .await?;

        assert!(user.entity_uuids.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_subject_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(
                &ctx.super_admin,
                new_account_user(ctx.account_uuid, Role::EntityUser, "dup-subject"),
            )
            .await?;

        let result = ctx
            .users
            .create_user(
                &ctx.super_admin,
                new_account_user(ctx.account_uuid, Role::EntityAdmin, "dup-subject"),
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn elevation_guard_blocks_before_any_write() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.account_admin();

        let attempt = NewAccountUser {
            account_uuid: None,
            ..new_account_user(ctx.account_uuid, Role::SuperAdmin, "sneaky-subject")
        };

        let result = ctx.users.create_user(&admin, attempt).await;

        assert!(
            matches!(
                result,
                Err(UsersServiceError::Auth(AuthError::Forbidden { .. }))
            ),
            "expected Forbidden, got {result:?}"
        );

        // Nothing was written.
        let listed = ctx.users.list_users(&ctx.super_admin, ctx.account_uuid).await?;
        assert!(!listed.iter().any(|u| u.subject_id == "sneaky-subject"));

        Ok(())
    }

    #[tokio::test]
    async fn super_admin_with_account_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(
                &ctx.super_admin,
                new_account_user(ctx.account_uuid, Role::SuperAdmin, "subject-3"),
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::SuperAdminMustBeAccountless)),
            "expected SuperAdminMustBeAccountless, got {result:?}"
        );
    }

    #[tokio::test]
    async fn non_super_roles_require_an_account() {
        let ctx = TestContext::new().await;

        let mut user = new_account_user(ctx.account_uuid, Role::EntityAdmin, "subject-4");
        user.account_uuid = None;

        let result = ctx.users.create_user(&ctx.super_admin, user).await;

        assert!(
            matches!(result, Err(UsersServiceError::AccountRequired)),
            "expected AccountRequired, got {result:?}"
        );
    }

    #[tokio::test]
    async fn account_admin_cannot_demote_a_super_admin() -> TestResult {
        let ctx = TestContext::new().await;

        let mut super_user = new_account_user(ctx.account_uuid, Role::SuperAdmin, "subject-5");
        super_user.account_uuid = None;
        let super_user = ctx.users.create_user(&ctx.super_admin, super_user).await?;

        let admin = ctx.account_admin();
        let result = ctx
            .users
            .update_user(
                &admin,
                super_user.uuid,
                AccountUserUpdate {
                    account_uuid: Some(ctx.account_uuid),
                    email: super_user.email.clone(),
                    display_name: super_user.display_name.clone(),
                    role: Role::EntityUser,
                    entity_uuids: Vec::new(),
                    is_active: true,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(UsersServiceError::Auth(AuthError::Forbidden { .. }))
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .delete_user(&ctx.super_admin, AccountUserUuid::new())
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
