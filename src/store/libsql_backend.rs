//! libSQL backend — async `SupportStore` implementation.
//!
//! Supports local file and in-memory databases. A single connection is
//! reused for all operations; `libsql::Connection` is `Send + Sync` and
//! safe for concurrent async use, and nothing writes to it after the
//! migrations run.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params_from_iter};
use tracing::{debug, info};

use crate::error::DataAccessError;
use crate::pipeline::types::{Row, RowSet};
use crate::store::migrations;
use crate::store::traits::{SqlParam, SupportStore, ensure_read_only};

/// libSQL store backend.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DataAccessError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DataAccessError::Open(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DataAccessError::Open(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DataAccessError::Open(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        info!(path = %path.display(), "Database opened");

        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Create an in-memory database (for tests and demo mode).
    pub async fn new_memory() -> Result<Self, DataAccessError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DataAccessError::Open(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DataAccessError::Open(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;

        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }
}

#[async_trait]
impl SupportStore for LibSqlStore {
    async fn run_select(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<RowSet, DataAccessError> {
        ensure_read_only(sql)?;

        let values: Vec<libsql::Value> = params.iter().map(param_to_value).collect();
        let mut rows = self
            .conn
            .query(sql, params_from_iter(values))
            .await
            .map_err(|e| DataAccessError::Query(e.to_string()))?;

        let column_count = rows.column_count();
        let column_names: Vec<String> = (0..column_count)
            .map(|i| {
                rows.column_name(i)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("column_{i}"))
            })
            .collect();

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DataAccessError::Query(e.to_string()))?
        {
            let mut record = Row::new();
            for (i, name) in column_names.iter().enumerate() {
                let value = row
                    .get_value(i as i32)
                    .map_err(|e| DataAccessError::Decode(e.to_string()))?;
                record.insert(name.clone(), value_to_json(value));
            }
            out.push(record);
        }

        debug!(rows = out.len(), "SELECT complete");
        Ok(RowSet::new(out))
    }
}

fn param_to_value(param: &SqlParam) -> libsql::Value {
    match param {
        SqlParam::Int(i) => libsql::Value::Integer(*i),
        SqlParam::Text(s) => libsql::Value::Text(s.clone()),
    }
}

fn value_to_json(value: libsql::Value) -> serde_json::Value {
    match value {
        libsql::Value::Null => serde_json::Value::Null,
        libsql::Value::Integer(i) => serde_json::Value::from(i),
        libsql::Value::Real(f) => serde_json::Value::from(f),
        libsql::Value::Text(s) => serde_json::Value::String(s),
        libsql::Value::Blob(b) => serde_json::Value::String(format!("<{} bytes>", b.len())),
    }
}
