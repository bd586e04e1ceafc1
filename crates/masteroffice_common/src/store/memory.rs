//! In-process configuration store, used when no remote backend is configured
//! and as the store behind directory tests.

use masteroffice_activation::ActivationCode;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{BoxFuture, ConfigStore, StoreError};
use crate::models::{TechnicianConfig, TechnicianEntry};

#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    records: Arc<RwLock<HashMap<ActivationCode, TechnicianConfig>>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored configurations.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn list_all(&self) -> BoxFuture<'_, Vec<TechnicianEntry>, StoreError> {
        Box::pin(async move {
            let records = self.records.read().await;
            Ok(records
                .iter()
                .map(|(code, config)| TechnicianEntry::new(code.clone(), config.clone()))
                .collect())
        })
    }

    fn get<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, TechnicianConfig, StoreError> {
        Box::pin(async move {
            self.records
                .read()
                .await
                .get(code)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(code.to_string()))
        })
    }

    fn insert_new<'a>(
        &'a self,
        code: &'a ActivationCode,
        config: &'a TechnicianConfig,
    ) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            // entry check and insert happen under one write guard
            let mut records = self.records.write().await;
            if records.contains_key(code) {
                debug!("Memory store already holds {}", code);
                return Err(StoreError::Conflict(code.to_string()));
            }
            records.insert(code.clone(), config.clone());
            Ok(())
        })
    }

    fn set_active<'a>(
        &'a self,
        code: &'a ActivationCode,
        active: bool,
    ) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            let mut records = self.records.write().await;
            let config = records
                .get_mut(code)
                .ok_or_else(|| StoreError::NotFound(code.to_string()))?;
            config.active = active;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            self.records
                .write()
                .await
                .remove(code)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound(code.to_string()))
        })
    }
}
