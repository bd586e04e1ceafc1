// --- File: crates/services/masteroffice_backend/src/app_state.rs ---
use masteroffice_common::store::ConfigStore;
use masteroffice_common::MasterOfficeError;
use masteroffice_config::AppConfig;
use masteroffice_directory::ConfigDirectory;
use std::sync::Arc;

use crate::service_factory::MasterOfficeServiceFactory;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// The configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// The technician directory over the selected store.
    pub directory: Arc<ConfigDirectory>,
}

impl AppState {
    /// Selects the store from `config` and builds the directory on top of it.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, MasterOfficeError> {
        let factory = MasterOfficeServiceFactory::new(config.clone()).await?;
        Ok(Self::from_factory(config, &factory))
    }

    /// Uses `store` directly instead of consulting the runtime flags.
    pub fn with_store(config: Arc<AppConfig>, store: Arc<dyn ConfigStore>) -> Self {
        let factory = MasterOfficeServiceFactory::with_store(config.clone(), store);
        Self::from_factory(config, &factory)
    }

    fn from_factory(config: Arc<AppConfig>, factory: &MasterOfficeServiceFactory) -> Self {
        Self {
            config,
            directory: Arc::new(factory.directory()),
        }
    }
}
