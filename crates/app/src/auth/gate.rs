//! Authorization gate: role-scoped visibility and mutation rules.
//!
//! Services check resource existence first (absent ids are `NotFound`,
//! not `Forbidden`), then call these gates before any write.

use crate::{
    auth::{errors::AuthError, principal::Principal, principal::Role},
    domain::{accounts::records::AccountUuid, entities::records::EntityUuid},
};

/// Roles permitted to mutate data. Entity users are read-only.
pub const WRITE_ROLES: &[Role] = &[
    Role::SuperAdmin,
    Role::AccountAdmin,
    Role::EntityAdmin,
    Role::ApiKey,
];

const SUPER_ADMIN_ONLY: &[Role] = &[Role::SuperAdmin];
const ACCOUNT_ADMIN_ROLES: &[Role] = &[Role::SuperAdmin, Role::AccountAdmin];

fn forbidden(principal: &Principal, required: &'static [Role]) -> AuthError {
    AuthError::Forbidden {
        role: principal.role,
        account_uuid: principal.account_uuid,
        required,
    }
}

/// Require the unrestricted super-admin role.
///
/// # Errors
///
/// `Forbidden` for any other role.
pub fn require_super_admin(principal: &Principal) -> Result<(), AuthError> {
    if principal.is_super_admin() {
        Ok(())
    } else {
        Err(forbidden(principal, SUPER_ADMIN_ONLY))
    }
}

/// Require account-admin (or super-admin) for critical account operations.
///
/// # Errors
///
/// `Forbidden` otherwise.
pub fn require_account_admin(principal: &Principal) -> Result<(), AuthError> {
    if matches!(principal.role, Role::SuperAdmin | Role::AccountAdmin) {
        Ok(())
    } else {
        Err(forbidden(principal, ACCOUNT_ADMIN_ROLES))
    }
}

/// Require a role allowed to mutate data.
///
/// # Errors
///
/// `Forbidden` reporting the caller's actual role and the roles required.
pub fn require_write(principal: &Principal) -> Result<(), AuthError> {
    if WRITE_ROLES.contains(&principal.role) {
        Ok(())
    } else {
        Err(forbidden(principal, WRITE_ROLES))
    }
}

/// Require that the principal may touch resources of the given account.
///
/// A cross-account reference fails loudly with `Forbidden` (surfacing the
/// caller's role and account), never a silent filter.
///
/// # Errors
///
/// `Forbidden` on account mismatch.
pub fn require_account_access(
    principal: &Principal,
    account: AccountUuid,
) -> Result<(), AuthError> {
    if principal.is_super_admin() || principal.account_uuid == Some(account) {
        Ok(())
    } else {
        Err(forbidden(principal, ACCOUNT_ADMIN_ROLES))
    }
}

/// Require that the entity is inside the principal's entity scope.
///
/// # Errors
///
/// `Forbidden` when the principal carries an explicit entity list that
/// does not contain the target.
pub fn require_entity_access(principal: &Principal, entity: EntityUuid) -> Result<(), AuthError> {
    if principal.is_super_admin() || principal.entity_scope.allows(entity) {
        Ok(())
    } else {
        Err(forbidden(principal, ACCOUNT_ADMIN_ROLES))
    }
}

/// Role-elevation guard: only a super admin may assign the super-admin
/// role. Must run before any write.
///
/// # Errors
///
/// `Forbidden` when a non-super-admin assigns `super_admin`.
pub fn require_role_assignable(principal: &Principal, target: Role) -> Result<(), AuthError> {
    if target == Role::SuperAdmin && !principal.is_super_admin() {
        Err(forbidden(principal, SUPER_ADMIN_ONLY))
    } else {
        Ok(())
    }
}
