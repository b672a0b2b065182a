//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{
        BearerAuthenticator, CredentialResolver, DeviceGate, IdentityToolkitClient, JwtCodec,
    },
    config::{AppConfig, BearerMode},
    database::{self, Db},
    domain::{
        accounts::service::{AccountsService, PgAccountsService},
        devices::service::{DevicesService, PgDevicesService},
        employees::service::{EmployeesService, PgEmployeesService},
        entities::service::{EntitiesService, PgEntitiesService},
        provisioning::service::{PgProvisioningService, ProvisioningService},
        sessions::service::{PgSessionsService, SessionsService},
        users::service::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("bearer mode 'identity-provider' requires identity provider settings")]
    MissingIdentityProvider,
}

/// The wired-up application: one resolver, one device gate, and one
/// service per domain area, all sharing a pool.
#[derive(Clone)]
pub struct AppContext {
    db: Db,
    pub resolver: Arc<CredentialResolver>,
    pub device_gate: Arc<DeviceGate>,
    pub accounts: Arc<dyn AccountsService>,
    pub entities: Arc<dyn EntitiesService>,
    pub users: Arc<dyn UsersService>,
    pub devices: Arc<dyn DevicesService>,
    pub employees: Arc<dyn EmployeesService>,
    pub provisioning: Arc<dyn ProvisioningService>,
    pub sessions: Arc<dyn SessionsService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// The bearer authentication strategy is fixed here, at startup;
    /// there is no per-request fallback between strategies.
    ///
    /// # Errors
    ///
    /// Returns an error when the database connection fails or the
    /// configuration is incomplete for the selected bearer mode.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());
        let jwt = Arc::new(JwtCodec::new(config.jwt_secret.as_bytes()));

        let bearer = match config.bearer_mode {
            BearerMode::IdentityProvider => {
                let provider = config
                    .identity_provider
                    .as_ref()
                    .ok_or(AppInitError::MissingIdentityProvider)?;

                BearerAuthenticator::IdentityProvider(Arc::new(IdentityToolkitClient::new(
                    provider.clone(),
                )))
            }
            BearerMode::LocalJwt => BearerAuthenticator::LocalJwt(Arc::clone(&jwt)),
        };

        Ok(Self {
            resolver: Arc::new(CredentialResolver::new(pool.clone(), bearer)),
            device_gate: Arc::new(DeviceGate::new(pool)),
            accounts: Arc::new(PgAccountsService::new(&db)),
            entities: Arc::new(PgEntitiesService::new(&db)),
            users: Arc::new(PgUsersService::new(&db)),
            devices: Arc::new(PgDevicesService::new(&db)),
            employees: Arc::new(PgEmployeesService::new(&db, jwt)),
            provisioning: Arc::new(PgProvisioningService::new(&db)),
            sessions: Arc::new(PgSessionsService::new(db.clone())),
            db,
        })
    }

    /// Close the pool, draining in-flight connections.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
