//! SQL implementation of the technician configuration store
//!
//! One row per activation code. `ships`, `locations` and `work` are stored as
//! JSON text and booleans as 0/1 integers, so the same schema works on
//! SQLite and PostgreSQL through the `Any` driver. `created_at` is kept as
//! decimal text: the `Any` driver narrows SQLite integers to 32 bits, which
//! would corrupt epoch milliseconds.

use crate::error::DbError;
use crate::DbClient;
use masteroffice_activation::ActivationCode;
use masteroffice_common::models::{TechnicianConfig, TechnicianEntry, WorkDefaults};
use masteroffice_common::store::{BoxFuture, ConfigStore, StoreError};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info, warn};

const SELECT_COLUMNS: &str = r#"
    SELECT code, technician_name, company_name, user_id, ships, locations, work,
           api_key, server_url, auto_sync, active, created_at
    FROM technician_configs
"#;

/// Technician configurations in a SQL table.
#[derive(Debug, Clone)]
pub struct SqlConfigStore {
    db_client: DbClient,
}

impl SqlConfigStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Creates the `technician_configs` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing technician config schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS technician_configs (
                code TEXT PRIMARY KEY NOT NULL,
                technician_name TEXT NOT NULL,
                company_name TEXT NOT NULL,
                user_id TEXT NOT NULL,
                ships TEXT NOT NULL,
                locations TEXT NOT NULL,
                work TEXT NOT NULL,
                api_key TEXT NOT NULL,
                server_url TEXT NOT NULL,
                auto_sync BIGINT NOT NULL,
                active BIGINT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Technician config schema initialized successfully");
        Ok(())
    }
}

fn query_failed(action: &str, err: sqlx::Error) -> StoreError {
    error!("Failed to {}: {}", action, err);
    StoreError::from(DbError::QueryError(err.to_string()))
}

fn encode_json<T: serde::Serialize>(code: &ActivationCode, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::invalid_record(code.as_str(), e))
}

fn row_to_entry(row: &AnyRow) -> Result<TechnicianEntry, StoreError> {
    let raw_code: String = row
        .try_get("code")
        .map_err(|e| StoreError::invalid_record("<unknown>", e))?;
    let invalid = |e: &dyn std::fmt::Display| StoreError::invalid_record(&raw_code, e);

    let code = ActivationCode::from_raw(raw_code.clone()).map_err(|e| invalid(&e))?;

    let text = |column: &str| -> Result<String, StoreError> {
        row.try_get::<String, _>(column).map_err(|e| invalid(&e))
    };
    let integer = |column: &str| -> Result<i64, StoreError> {
        row.try_get::<i64, _>(column).map_err(|e| invalid(&e))
    };

    let created_at: i64 = text("created_at")?
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(&e))?;

    let ships: Vec<String> = serde_json::from_str(&text("ships")?).map_err(|e| invalid(&e))?;
    let locations: Vec<String> =
        serde_json::from_str(&text("locations")?).map_err(|e| invalid(&e))?;
    let work: WorkDefaults = serde_json::from_str(&text("work")?).map_err(|e| invalid(&e))?;

    let config = TechnicianConfig {
        technician_name: text("technician_name")?,
        company_name: text("company_name")?,
        user_id: text("user_id")?,
        ships,
        locations,
        work,
        api_key: text("api_key")?,
        server_url: text("server_url")?,
        auto_sync: integer("auto_sync")? != 0,
        active: integer("active")? != 0,
        created_at,
    };

    Ok(TechnicianEntry::new(code, config))
}

impl ConfigStore for SqlConfigStore {
    fn backend_name(&self) -> &'static str {
        "sql"
    }

    fn list_all(&self) -> BoxFuture<'_, Vec<TechnicianEntry>, StoreError> {
        Box::pin(async move {
            debug!("Listing all technician configs");

            let rows = sqlx::query(SELECT_COLUMNS)
                .fetch_all(self.db_client.pool())
                .await
                .map_err(|e| query_failed("list technician configs", e))?;

            rows.iter().map(row_to_entry).collect()
        })
    }

    fn get<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, TechnicianConfig, StoreError> {
        Box::pin(async move {
            debug!("Fetching technician config for code: {}", code);

            let query = format!("{} WHERE code = $1", SELECT_COLUMNS);
            let row = sqlx::query(&query)
                .bind(code.as_str())
                .fetch_optional(self.db_client.pool())
                .await
                .map_err(|e| query_failed("fetch technician config", e))?
                .ok_or_else(|| StoreError::NotFound(code.to_string()))?;

            row_to_entry(&row).map(|entry| entry.config)
        })
    }

    fn insert_new<'a>(
        &'a self,
        code: &'a ActivationCode,
        config: &'a TechnicianConfig,
    ) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            debug!("Inserting technician config for code: {}", code);

            let query = r#"
                INSERT INTO technician_configs (
                    code, technician_name, company_name, user_id, ships, locations, work,
                    api_key, server_url, auto_sync, active, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                ON CONFLICT (code) DO NOTHING
            "#;

            let result = sqlx::query(query)
                .bind(code.as_str())
                .bind(config.technician_name.as_str())
                .bind(config.company_name.as_str())
                .bind(config.user_id.as_str())
                .bind(encode_json(code, &config.ships)?)
                .bind(encode_json(code, &config.locations)?)
                .bind(encode_json(code, &config.work)?)
                .bind(config.api_key.as_str())
                .bind(config.server_url.as_str())
                .bind(i64::from(config.auto_sync))
                .bind(i64::from(config.active))
                .bind(config.created_at.to_string())
                .execute(self.db_client.pool())
                .await
                .map_err(|e| query_failed("insert technician config", e))?;

            if result.rows_affected() == 0 {
                warn!("Activation code {} already present in database", code);
                return Err(StoreError::Conflict(code.to_string()));
            }

            info!("Technician config stored for code: {}", code);
            Ok(())
        })
    }

    fn set_active<'a>(
        &'a self,
        code: &'a ActivationCode,
        active: bool,
    ) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            debug!("Setting active={} for code: {}", active, code);

            let result = sqlx::query("UPDATE technician_configs SET active = $1 WHERE code = $2")
                .bind(i64::from(active))
                .bind(code.as_str())
                .execute(self.db_client.pool())
                .await
                .map_err(|e| query_failed("update technician config", e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(code.to_string()));
            }
            Ok(())
        })
    }

    fn delete<'a>(&'a self, code: &'a ActivationCode) -> BoxFuture<'a, (), StoreError> {
        Box::pin(async move {
            debug!("Deleting technician config for code: {}", code);

            let result = sqlx::query("DELETE FROM technician_configs WHERE code = $1")
                .bind(code.as_str())
                .execute(self.db_client.pool())
                .await
                .map_err(|e| query_failed("delete technician config", e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(code.to_string()));
            }

            info!("Technician config deleted for code: {}", code);
            Ok(())
        })
    }
}
