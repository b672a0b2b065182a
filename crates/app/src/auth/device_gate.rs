//! Device operational gate, distinct from role-based authorization.

use sqlx::PgPool;

use crate::{
    auth::{errors::AuthError, principal::Principal, repository::PgAuthRepository},
    domain::devices::records::DeviceStatus,
};

/// Checks the calling device's own operational status.
///
/// Principals without a device binding (legacy tokens, web channel) pass
/// through; a backing-store failure is logged and never blocks the
/// caller.
#[derive(Debug, Clone)]
pub struct DeviceGate {
    repository: PgAuthRepository,
}

impl DeviceGate {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Verify the caller's device is operational.
    ///
    /// # Errors
    ///
    /// [`AuthError::DeviceInactive`] when the bound device exists and its
    /// status is not `ACTIVO`. The client must treat this as a hard
    /// logout.
    pub async fn check(&self, principal: &Principal) -> Result<(), AuthError> {
        let Some(binding) = &principal.device else {
            return Ok(());
        };

        let status = match self
            .repository
            .find_device_status(binding.entity_uuid, &binding.hardware_id)
            .await
        {
            Ok(status) => status,
            Err(error) => {
                tracing::warn!(
                    hardware_id = %binding.hardware_id,
                    entity = %binding.entity_uuid,
                    %error,
                    "device status lookup failed, allowing request"
                );

                return Ok(());
            }
        };

        match status {
            // Unregistered devices pass; registration is a separate flow.
            None => Ok(()),
            Some(status) if status == DeviceStatus::Active.as_str() => Ok(()),
            Some(status) => Err(AuthError::DeviceInactive { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::principal::DeviceBinding,
        domain::devices::{data::DeviceUpdate, service::DevicesService},
        test::{TestContext, new_device},
    };

    fn bound_principal(ctx: &TestContext, hardware_id: &str) -> Principal {
        let mut principal = ctx.entity_user(vec![ctx.entity_uuid]);
        principal.device = Some(DeviceBinding {
            hardware_id: hardware_id.to_string(),
            entity_uuid: ctx.entity_uuid,
        });

        principal
    }

    #[tokio::test]
    async fn principal_without_device_binding_passes() {
        let ctx = TestContext::new().await;
        let gate = DeviceGate::new(ctx.db.pool().clone());

        assert!(gate.check(&ctx.super_admin).await.is_ok());
    }

    #[tokio::test]
    async fn unregistered_device_passes() {
        let ctx = TestContext::new().await;
        let gate = DeviceGate::new(ctx.db.pool().clone());

        let result = gate.check(&bound_principal(&ctx, "hw-never-enrolled")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn active_device_passes() -> TestResult {
        let ctx = TestContext::new().await;
        let gate = DeviceGate::new(ctx.db.pool().clone());
        let principal = bound_principal(&ctx, "hw-ok");

        ctx.devices
            .register_device(&principal, ctx.entity_uuid, new_device("hw-ok"))
            .await?;

        assert!(gate.check(&principal).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn suspended_device_is_blocked_with_its_status() -> TestResult {
        let ctx = TestContext::new().await;
        let gate = DeviceGate::new(ctx.db.pool().clone());
        let principal = bound_principal(&ctx, "hw-bad");

        let device = ctx
            .devices
            .register_device(&principal, ctx.entity_uuid, new_device("hw-bad"))
            .await?;

        ctx.devices
            .update_device(
                &principal,
                ctx.entity_uuid,
                "hw-bad",
                DeviceUpdate {
                    status: DeviceStatus::Suspended,
                    line_number: device.line_number,
                    location: device.location,
                    coordinates: device.coordinates,
                    radius_m: device.radius_m,
                    panic_enabled: device.panic_enabled,
                },
            )
            .await?;

        let error = gate
            .check(&principal)
            .await
            .expect_err("suspended device must be rejected");

        assert!(matches!(
            &error,
            AuthError::DeviceInactive { status } if status == "SUSPENDIDO"
        ));
        assert_eq!(error.http_status(), 400);

        Ok(())
    }
}
