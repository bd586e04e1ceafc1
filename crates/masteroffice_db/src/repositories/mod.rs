//! Repositories backed by the SQL database.

pub mod technician_config_factory;
pub mod technician_config_sql;

pub use technician_config_factory::TechnicianConfigRepositoryFactory;
pub use technician_config_sql::SqlConfigStore;
