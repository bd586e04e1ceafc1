// --- File: crates/services/masteroffice_backend/src/service_factory.rs ---
//! Chooses and builds the configuration store.
//!
//! Selection order: Firestore when `use_firestore`, SQL when `use_database`,
//! otherwise an in-process store. A backend that is requested but compiled
//! out, or whose config section is missing, is a startup error rather than a
//! silent fallback.

use masteroffice_common::store::{ConfigStore, MemoryConfigStore};
use masteroffice_common::{config_error, MasterOfficeError};
#[cfg(feature = "database")]
use masteroffice_common::store_unavailable;
use masteroffice_config::AppConfig;
use masteroffice_directory::ConfigDirectory;
use std::sync::Arc;
#[allow(unused_imports)] // used depending on the enabled store features
use tracing::{error, info, warn};

#[cfg(feature = "database")]
use masteroffice_db::{DbClient, RepositoryFactory, TechnicianConfigRepositoryFactory};

#[cfg(feature = "firebase")]
use masteroffice_firebase::FirestoreConfigStore;

/// Holds the store selected for this process.
pub struct MasterOfficeServiceFactory {
    config: Arc<AppConfig>,
    store: Arc<dyn ConfigStore>,
}

impl MasterOfficeServiceFactory {
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, MasterOfficeError> {
        let store = build_store(&config).await?;
        info!("Using the {} configuration store", store.backend_name());
        Ok(Self { config, store })
    }

    /// Wraps an already built store, e.g. in tests.
    pub fn with_store(config: Arc<AppConfig>, store: Arc<dyn ConfigStore>) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> Arc<dyn ConfigStore> {
        self.store.clone()
    }

    /// A directory over the selected store, honouring `[directory]`.
    pub fn directory(&self) -> ConfigDirectory {
        ConfigDirectory::from_config(self.store(), &self.config.directory)
    }
}

async fn build_store(config: &Arc<AppConfig>) -> Result<Arc<dyn ConfigStore>, MasterOfficeError> {
    if config.use_firestore {
        return firestore_store(config);
    }
    if config.use_database {
        return database_store(config).await;
    }

    warn!("No persistent store configured; technician configurations live in memory only");
    Ok(Arc::new(MemoryConfigStore::new()))
}

#[cfg(feature = "firebase")]
fn firestore_store(config: &AppConfig) -> Result<Arc<dyn ConfigStore>, MasterOfficeError> {
    let firestore = config
        .firestore
        .as_ref()
        .ok_or_else(|| config_error("use_firestore is set but [firestore] is missing"))?;

    let store = FirestoreConfigStore::from_config(firestore).map_err(|e| {
        error!("Failed to initialize Firestore store: {}", e);
        config_error(e)
    })?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "firebase"))]
fn firestore_store(_config: &AppConfig) -> Result<Arc<dyn ConfigStore>, MasterOfficeError> {
    Err(config_error(
        "use_firestore is set but this binary was built without the firebase feature",
    ))
}

#[cfg(feature = "database")]
async fn database_store(config: &Arc<AppConfig>) -> Result<Arc<dyn ConfigStore>, MasterOfficeError> {
    info!("Initializing SQL configuration store...");
    let client = DbClient::new(config).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        config_error(e)
    })?;

    let store = TechnicianConfigRepositoryFactory::new().create_repository(client);
    store.init_schema().await.map_err(|e| {
        error!("Failed to initialize database schema: {}", e);
        store_unavailable(e)
    })?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "database"))]
async fn database_store(
    _config: &Arc<AppConfig>,
) -> Result<Arc<dyn ConfigStore>, MasterOfficeError> {
    Err(config_error(
        "use_database is set but this binary was built without the database feature",
    ))
}
