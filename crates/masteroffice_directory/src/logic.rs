// --- File: crates/masteroffice_directory/src/logic.rs ---
use masteroffice_activation::{ActivationCode, CodeError};
use masteroffice_common::models::{TechnicianConfig, TechnicianEntry};
use masteroffice_common::store::{ConfigStore, StoreError};
use masteroffice_common::{
    forbidden, internal_error, not_found, store_unavailable, validation_error, MasterOfficeError,
};
use masteroffice_config::DirectoryConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::draft::{DraftError, TechnicianDraft};
use crate::models::DirectorySummary;

/// Default bound on code generations per create.
pub const DEFAULT_MAX_CREATE_ATTEMPTS: u32 = 5;

// --- Error Handling ---
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("{0}")]
    Validation(String),

    #[error("No technician configuration for code {0}")]
    NotFound(String),

    #[error("Technician configuration {0} is deactivated")]
    Inactive(String),

    #[error("No free activation code found after {0} attempts")]
    CollisionsExhausted(u32),

    #[error("Configuration store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal directory error: {0}")]
    Internal(String),
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(code) => DirectoryError::NotFound(code),
            StoreError::Unavailable(message) => DirectoryError::StoreUnavailable(message),
            // conflicts are consumed by `create`; anywhere else they are a bug
            StoreError::Conflict(_) | StoreError::InvalidRecord { .. } => {
                DirectoryError::Internal(err.to_string())
            }
        }
    }
}

impl From<DraftError> for DirectoryError {
    fn from(err: DraftError) -> Self {
        DirectoryError::Validation(err.to_string())
    }
}

impl From<CodeError> for DirectoryError {
    fn from(err: CodeError) -> Self {
        DirectoryError::Validation(err.to_string())
    }
}

impl From<DirectoryError> for MasterOfficeError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Validation(message) => validation_error(message),
            DirectoryError::NotFound(_) => not_found(err),
            DirectoryError::Inactive(_) => forbidden(err),
            DirectoryError::StoreUnavailable(message) => store_unavailable(message),
            DirectoryError::CollisionsExhausted(_) | DirectoryError::Internal(_) => {
                internal_error(err)
            }
        }
    }
}

/// Produces candidate codes for `create`.
pub type CodeGenerator = Arc<dyn Fn() -> ActivationCode + Send + Sync>;

/// The technician configuration directory.
///
/// Stateless apart from the injected store: every call goes straight to the
/// backend, keyed by activation code.
#[derive(Clone)]
pub struct ConfigDirectory {
    store: Arc<dyn ConfigStore>,
    generate_code: CodeGenerator,
    max_create_attempts: u32,
}

impl ConfigDirectory {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            generate_code: Arc::new(ActivationCode::generate),
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
        }
    }

    /// Builds a directory honouring the `[directory]` config section.
    pub fn from_config(store: Arc<dyn ConfigStore>, config: &DirectoryConfig) -> Self {
        Self::new(store).with_max_create_attempts(config.max_create_attempts)
    }

    pub fn with_max_create_attempts(mut self, attempts: u32) -> Self {
        self.max_create_attempts = attempts.max(1);
        self
    }

    /// Replaces the random code source, e.g. with a scripted sequence in tests.
    pub fn with_code_generator(mut self, generator: CodeGenerator) -> Self {
        self.generate_code = generator;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Every configuration with its code, in store order.
    pub async fn list_all(&self) -> Result<Vec<TechnicianEntry>, DirectoryError> {
        debug!("Listing technician configurations");
        self.store.list_all().await.map_err(|err| {
            error!("Failed to list technician configurations: {}", err);
            DirectoryError::from(err)
        })
    }

    /// Configurations for the back office list, newest first.
    pub async fn list_for_display(&self) -> Result<Vec<TechnicianEntry>, DirectoryError> {
        let mut entries = self.list_all().await?;
        entries.sort_by(|a, b| {
            b.config
                .created_at
                .cmp(&a.config.created_at)
                .then_with(|| a.activation_code.cmp(&b.activation_code))
        });
        Ok(entries)
    }

    pub async fn get(&self, code: &ActivationCode) -> Result<TechnicianConfig, DirectoryError> {
        debug!("Fetching technician configuration {}", code);
        self.store.get(code).await.map_err(|err| {
            if !matches!(err, StoreError::NotFound(_)) {
                error!("Failed to fetch technician configuration {}: {}", code, err);
            }
            DirectoryError::from(err)
        })
    }

    /// Stores `config` under a freshly generated code.
    ///
    /// Collisions are retried with a new code up to the configured number of
    /// attempts, then reported as [`DirectoryError::CollisionsExhausted`].
    pub async fn create(&self, config: TechnicianConfig) -> Result<ActivationCode, DirectoryError> {
        for attempt in 1..=self.max_create_attempts {
            let code = (self.generate_code)();
            debug!("Create attempt {} with code {}", attempt, code);

            match self.store.insert_new(&code, &config).await {
                Ok(()) => {
                    info!(
                        "Created technician configuration {} for {}",
                        code, config.technician_name
                    );
                    return Ok(code);
                }
                Err(StoreError::Conflict(_)) => {
                    warn!("Activation code {} already taken, regenerating", code);
                }
                Err(err) => {
                    error!("Failed to store technician configuration: {}", err);
                    return Err(err.into());
                }
            }
        }

        error!(
            "Gave up creating technician configuration after {} collisions",
            self.max_create_attempts
        );
        Err(DirectoryError::CollisionsExhausted(self.max_create_attempts))
    }

    /// Validates a form submission and creates the configuration.
    pub async fn submit_draft(
        &self,
        draft: TechnicianDraft,
    ) -> Result<TechnicianEntry, DirectoryError> {
        let config = draft.validate().map_err(|err| {
            debug!("Rejected technician draft: {}", err);
            DirectoryError::from(err)
        })?;
        let code = self.create(config.clone()).await?;
        Ok(TechnicianEntry::new(code, config))
    }

    pub async fn set_active(&self, code: &ActivationCode, active: bool) -> Result<(), DirectoryError> {
        debug!("Setting technician configuration {} active={}", code, active);
        self.store.set_active(code, active).await.map_err(|err| {
            error!("Failed to update technician configuration {}: {}", code, err);
            DirectoryError::from(err)
        })?;
        info!("Technician configuration {} is now active={}", code, active);
        Ok(())
    }

    /// Flips the `active` flag and returns the new value.
    ///
    /// Read-then-write: two concurrent toggles may both read the same value.
    pub async fn toggle(&self, code: &ActivationCode) -> Result<bool, DirectoryError> {
        let current = self.get(code).await?;
        let next = !current.active;
        self.set_active(code, next).await?;
        Ok(next)
    }

    pub async fn delete(&self, code: &ActivationCode) -> Result<(), DirectoryError> {
        debug!("Deleting technician configuration {}", code);
        self.store.delete(code).await.map_err(|err| {
            if !matches!(err, StoreError::NotFound(_)) {
                error!("Failed to delete technician configuration {}: {}", code, err);
            }
            DirectoryError::from(err)
        })?;
        info!("Deleted technician configuration {}", code);
        Ok(())
    }

    /// Device onboarding: resolves a human-entered code to its configuration.
    ///
    /// Malformed input never reaches the store; deactivated configurations
    /// are refused with [`DirectoryError::Inactive`].
    pub async fn redeem(&self, input: &str) -> Result<TechnicianEntry, DirectoryError> {
        let code = ActivationCode::parse(input)?;
        let config = self.get(&code).await?;
        if !config.active {
            warn!("Refused onboarding with deactivated code {}", code);
            return Err(DirectoryError::Inactive(code.into_inner()));
        }
        info!("Activation code {} redeemed by {}", code, config.user_id);
        Ok(TechnicianEntry::new(code, config))
    }

    pub async fn summary(&self) -> Result<DirectorySummary, DirectoryError> {
        let entries = self.list_all().await?;
        let active = entries.iter().filter(|entry| entry.config.active).count();
        Ok(DirectorySummary {
            total: entries.len(),
            active,
            inactive: entries.len() - active,
        })
    }
}

impl std::fmt::Debug for ConfigDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDirectory")
            .field("backend", &self.store.backend_name())
            .field("max_create_attempts", &self.max_create_attempts)
            .finish()
    }
}
