//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use zeroize::Zeroizing;

use crate::{
    auth::{Principal, gate},
    database::Db,
    domain::accounts::{
        data::{
            AccountUpdate, NewAccount, database_name_slug, generate_account_storage_id,
            generate_api_key,
        },
        errors::AccountsServiceError,
        records::{AccountRecord, AccountUuid, CreatedAccount},
        repository::PgAccountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: PgAccountsRepository::new(db.pool().clone()),
        }
    }

    /// Fetch an account, mapping absence to `NotFound`.
    ///
    /// Existence is checked before authorization so an unauthorized caller
    /// probing a nonexistent account still sees `NotFound`.
    async fn fetch_existing(
        &self,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.repository
            .get_account(account)
            .await?
            .ok_or(AccountsServiceError::NotFound)
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn create_account(
        &self,
        principal: &Principal,
        account: NewAccount,
    ) -> Result<CreatedAccount, AccountsServiceError> {
        gate::require_super_admin(principal)?;

        if account.billing_name.trim().is_empty() {
            return Err(AccountsServiceError::MissingRequiredData);
        }

        let database_name = database_name_slug(&account.billing_name);
        let storage_id = generate_account_storage_id();
        let api_key = generate_api_key();

        let record = self
            .repository
            .create_account(account, database_name, storage_id, &api_key)
            .await?;

        Ok(CreatedAccount {
            account: record,
            api_key,
        })
    }

    async fn get_account(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let record = self.fetch_existing(account).await?;

        gate::require_account_access(principal, account)?;

        Ok(record)
    }

    async fn list_accounts(
        &self,
        principal: &Principal,
    ) -> Result<Vec<AccountRecord>, AccountsServiceError> {
        if principal.is_super_admin() {
            return Ok(self.repository.list_accounts().await?);
        }

        // Non-super callers only ever see their own account.
        let Some(own) = principal.account_uuid else {
            return Ok(Vec::new());
        };

        Ok(self
            .repository
            .get_account(own)
            .await?
            .into_iter()
            .collect())
    }

    async fn update_account(
        &self,
        principal: &Principal,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.fetch_existing(account).await?;

        gate::require_write(principal)?;
        gate::require_account_access(principal, account)?;

        self.repository
            .update_account(account, update)
            .await?
            .ok_or(AccountsServiceError::NotFound)
    }

    async fn delete_account(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<(), AccountsServiceError> {
        self.fetch_existing(account).await?;

        gate::require_super_admin(principal)?;

        let rows_affected = self.repository.delete_account(account).await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        Ok(())
    }

    async fn rotate_api_key(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<Zeroizing<String>, AccountsServiceError> {
        self.fetch_existing(account).await?;

        gate::require_account_admin(principal)?;
        gate::require_account_access(principal, account)?;

        let api_key = generate_api_key();
        let rows_affected = self.repository.rotate_api_key(account, &api_key).await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        Ok(api_key)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Creates an account, minting its slug, storage id and API key.
    /// Super-admin only.
    async fn create_account(
        &self,
        principal: &Principal,
        account: NewAccount,
    ) -> Result<CreatedAccount, AccountsServiceError>;

    /// Retrieves a single account the caller is allowed to see.
    async fn get_account(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Lists all accounts for a super admin, or the caller's own account.
    async fn list_accounts(
        &self,
        principal: &Principal,
    ) -> Result<Vec<AccountRecord>, AccountsServiceError>;

    /// Replaces the mutable fields of an account.
    async fn update_account(
        &self,
        principal: &Principal,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Deletes an account and everything under it. Super-admin only.
    async fn delete_account(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<(), AccountsServiceError>;

    /// Mints and stores a fresh API key, returning the raw key once.
    async fn rotate_api_key(
        &self,
        principal: &Principal,
        account: AccountUuid,
    ) -> Result<Zeroizing<String>, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::AuthError,
        test::{TestContext, new_account},
    };

    use super::*;

    #[tokio::test]
    async fn create_account_derives_database_name_slug() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("Acme Corp"))
            .await?;

        assert_eq!(created.account.database_name, "db_acme_corp");
        assert_eq!(created.api_key.len(), 64);
        assert!(created.account.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_account_rejects_non_super_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.account_admin();

        let result = ctx
            .accounts
            .create_account(&admin, new_account("Acme Corp"))
            .await;

        assert!(
            matches!(
                result,
                Err(AccountsServiceError::Auth(AuthError::Forbidden { .. }))
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_account_rejects_blank_billing_name() {
        let ctx = TestContext::new().await;

        let result = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("   "))
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_account_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .accounts
            .get_account(&ctx.super_admin, AccountUuid::new())
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_account_not_found_wins_over_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.account_admin();

        // Existence is checked before authorization, so a nonexistent
        // uuid yields 404 even for a caller who would otherwise get 403.
        let result = ctx.accounts.get_account(&admin, AccountUuid::new()).await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cross_account_get_is_forbidden_with_role_surfaced() -> TestResult {
        let ctx = TestContext::new().await;

        let other = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("Other Co"))
            .await?;

        let admin = ctx.account_admin();
        let result = ctx
            .accounts
            .get_account(&admin, other.account.uuid)
            .await;

        match result {
            Err(AccountsServiceError::Auth(AuthError::Forbidden { role, .. })) => {
                assert_eq!(role, crate::auth::Role::AccountAdmin);
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn list_accounts_scopes_to_own_account_for_admins() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .create_account(&ctx.super_admin, new_account("Other Co"))
            .await?;

        let admin = ctx.account_admin();
        let accounts = ctx.accounts.list_accounts(&admin).await?;

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].uuid, ctx.account_uuid);

        let all = ctx.accounts.list_accounts(&ctx.super_admin).await?;
        assert!(all.len() >= 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_account_does_not_rederive_slug() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("Acme Corp"))
            .await?;

        let mut update = crate::test::account_update(&created.account);
        update.billing_name = "Renamed Holdings".to_string();

        let updated = ctx
            .accounts
            .update_account(&ctx.super_admin, created.account.uuid, update)
            .await?;

        assert_eq!(updated.billing_name, "Renamed Holdings");
        assert_eq!(updated.database_name, "db_acme_corp");

        Ok(())
    }

    #[tokio::test]
    async fn delete_account_requires_super_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.account_admin();

        let result = ctx.accounts.delete_account(&admin, ctx.account_uuid).await;

        assert!(
            matches!(
                result,
                Err(AccountsServiceError::Auth(AuthError::Forbidden { .. }))
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn rotate_api_key_replaces_the_stored_key() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .accounts
            .create_account(&ctx.super_admin, new_account("Rotating Co"))
            .await?;

        let rotated = ctx
            .accounts
            .rotate_api_key(&ctx.super_admin, created.account.uuid)
            .await?;

        assert_ne!(*rotated, *created.api_key);
        assert_eq!(rotated.len(), 64);

        Ok(())
    }
}
