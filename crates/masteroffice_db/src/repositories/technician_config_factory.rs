//! Factory for the SQL technician configuration store

use crate::repositories::technician_config_sql::SqlConfigStore;
use crate::{DbClient, RepositoryFactory};

#[derive(Debug, Clone, Default)]
pub struct TechnicianConfigRepositoryFactory;

impl TechnicianConfigRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlConfigStore, DbClient> for TechnicianConfigRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlConfigStore {
        SqlConfigStore::new(db_client)
    }
}
