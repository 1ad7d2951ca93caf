use std::sync::Arc;

use crate::auth::CredentialService;
use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::services::{AuthService, TaskService, UserService};
use crate::store::{MemoryStore, PgStore, TaskStore, UserStore};

/// Everything the handlers and the access guard share, registered once as
/// `web::Data<AppState>`.
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    /// Used by `AuthGuard` to resolve token identities.
    pub user_store: Arc<dyn UserStore>,
    pub auth: AuthService,
    pub users: UserService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(
        credentials: CredentialService,
        user_store: Arc<dyn UserStore>,
        task_store: Arc<dyn TaskStore>,
    ) -> Self {
        let credentials = Arc::new(credentials);
        Self {
            auth: AuthService::new(user_store.clone(), credentials.clone()),
            users: UserService::new(user_store.clone()),
            tasks: TaskService::new(task_store),
            credentials,
            user_store,
        }
    }

    /// State over a fresh [`MemoryStore`].
    pub fn in_memory(config: &Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(CredentialService::from_config(config), store.clone(), store)
    }

    /// Builds the state for the configured backend, connecting and migrating Postgres if
    /// selected.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Memory => Ok(Self::in_memory(config)),
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| AppError::Config("DATABASE_URL must be set".into()))?;
                let store = Arc::new(PgStore::connect(url).await?);
                Ok(Self::new(
                    CredentialService::from_config(config),
                    store.clone(),
                    store,
                ))
            }
        }
    }
}
