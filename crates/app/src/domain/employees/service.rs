//! Employees service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{JwtCodec, MobileClaims, Principal, gate, hash_password, verify_password},
    database::Db,
    domain::{
        employees::{
            data::{LoginRequest, NewEmployee},
            errors::EmployeesServiceError,
            records::{EmployeeRecord, MobileLogin},
            repository::PgEmployeesRepository,
        },
        entities::records::EntityUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgEmployeesService {
    repository: PgEmployeesRepository,
    jwt: Arc<JwtCodec>,
}

impl PgEmployeesService {
    #[must_use]
    pub fn new(db: &Db, jwt: Arc<JwtCodec>) -> Self {
        Self {
            repository: PgEmployeesRepository::new(db.pool().clone()),
            jwt,
        }
    }
}

#[async_trait]
impl EmployeesService for PgEmployeesService {
    async fn register_employee(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        gate::require_entity_access(principal, entity)?;

        if employee.employee_code.trim().is_empty() || employee.badge_number.trim().is_empty() {
            return Err(EmployeesServiceError::MissingRequiredData);
        }

        let hash = hash_password(&employee.access_key)?;

        Ok(self
            .repository
            .register_employee(
                entity,
                employee.uuid,
                &employee.employee_code,
                &employee.badge_number,
                &employee.profile,
                &hash,
            )
            .await?)
    }

    async fn login(
        &self,
        entity: EntityUuid,
        request: LoginRequest,
    ) -> Result<MobileLogin, EmployeesServiceError> {
        let found = self
            .repository
            .find_by_badge(entity, &request.badge_number)
            .await?
            .ok_or(EmployeesServiceError::NotFound)?;

        if !verify_password(&request.access_key, &found.password_hash)? {
            return Err(EmployeesServiceError::InvalidCredential);
        }

        let employee = found.record;
        let claims = MobileClaims::new(
            employee.employee_code.clone(),
            employee.badge_number.clone(),
            employee.profile.clone(),
            entity,
            request.hardware_id,
        );

        let token = self.jwt.encode(&claims)?;

        Ok(MobileLogin { token, employee })
    }

    async fn recover_access_key(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
        new_access_key: &str,
    ) -> Result<(), EmployeesServiceError> {
        gate::require_entity_access(principal, entity)?;

        let hash = hash_password(new_access_key)?;

        let rows_affected = self
            .repository
            .update_access_key(entity, employee_code, &hash)
            .await?;

        if rows_affected == 0 {
            return Err(EmployeesServiceError::NotFound);
        }

        Ok(())
    }

    async fn get_profile(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        gate::require_entity_access(principal, entity)?;

        self.repository
            .get_employee(entity, employee_code)
            .await?
            .ok_or(EmployeesServiceError::NotFound)
    }

    async fn list_employees(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<Vec<EmployeeRecord>, EmployeesServiceError> {
        gate::require_entity_access(principal, entity)?;

        Ok(self.repository.list_employees(entity).await?)
    }

    async fn delete_employee(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<(), EmployeesServiceError> {
        gate::require_write(principal)?;
        gate::require_entity_access(principal, entity)?;

        let rows_affected = self
            .repository
            .delete_employee(entity, employee_code)
            .await?;

        if rows_affected == 0 {
            return Err(EmployeesServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EmployeesService: Send + Sync {
    /// Registers an employee, hashing the access key before storage.
    async fn register_employee(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Badge-and-key login. Mints a short-lived mobile token on success.
    /// Unauthenticated by design; this is how mobile sessions begin.
    async fn login(
        &self,
        entity: EntityUuid,
        request: LoginRequest,
    ) -> Result<MobileLogin, EmployeesServiceError>;

    /// Replaces an employee's access key.
    async fn recover_access_key(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
        new_access_key: &str,
    ) -> Result<(), EmployeesServiceError>;

    /// Retrieves one employee's profile.
    async fn get_profile(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Lists the entity's employees.
    async fn list_employees(
        &self,
        principal: &Principal,
        entity: EntityUuid,
    ) -> Result<Vec<EmployeeRecord>, EmployeesServiceError>;

    /// Removes an employee. Write roles only.
    async fn delete_employee(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<(), EmployeesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use zeroize::Zeroizing;

    use crate::test::{TestContext, new_employee};

    use super::*;

    fn login_as(badge: &str, key: &str) -> LoginRequest {
        LoginRequest {
            badge_number: badge.to_string(),
            access_key: Zeroizing::new(key.to_string()),
            hardware_id: Some("hw-test".to_string()),
        }
    }

    #[tokio::test]
    async fn register_then_login_mints_a_decodable_token() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.employees
            .register_employee(
                &ctx.super_admin,
                ctx.entity_uuid,
                new_employee("emp-001", "1234", "guard-key"),
            )
            .await?;

        let login = ctx
            .employees
            .login(ctx.entity_uuid, login_as("1234", "guard-key"))
            .await?;

        let claims = ctx.jwt.decode(&login.token)?;

        assert_eq!(claims.sub, "emp-001");
        assert_eq!(claims.badge, "1234");
        assert_eq!(claims.entity, ctx.entity_uuid.into_uuid());
        assert_eq!(claims.device.as_deref(), Some("hw-test"));

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_key_is_invalid_credential() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.employees
            .register_employee(
                &ctx.super_admin,
                ctx.entity_uuid,
                new_employee("emp-002", "5678", "right-key"),
            )
            .await?;

        let result = ctx
            .employees
            .login(ctx.entity_uuid, login_as("5678", "wrong-key"))
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::InvalidCredential)),
            "expected InvalidCredential, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_badge_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .employees
            .login(ctx.entity_uuid, login_as("0000", "any"))
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_badge_returns_already_registered() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.employees
            .register_employee(
                &ctx.super_admin,
                ctx.entity_uuid,
                new_employee("emp-003", "9999", "key-a"),
            )
            .await?;

        let result = ctx
            .employees
            .register_employee(
                &ctx.super_admin,
                ctx.entity_uuid,
                new_employee("emp-004", "9999", "key-b"),
            )
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::AlreadyRegistered)),
            "expected AlreadyRegistered, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn recover_access_key_invalidates_the_old_one() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.employees
            .register_employee(
                &ctx.super_admin,
                ctx.entity_uuid,
                new_employee("emp-005", "4321", "old-key"),
            )
            .await?;

        ctx.employees
            .recover_access_key(&ctx.super_admin, ctx.entity_uuid, "emp-005", "new-key")
            .await?;

        let old = ctx
            .employees
            .login(ctx.entity_uuid, login_as("4321", "old-key"))
            .await;
        assert!(matches!(old, Err(EmployeesServiceError::InvalidCredential)));

        ctx.employees
            .login(ctx.entity_uuid, login_as("4321", "new-key"))
            .await?;

        Ok(())
    }
}
