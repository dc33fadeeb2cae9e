//! Version-tracked database migrations for the libSQL backend.
//!
//! Each migration has a version number and SQL. `run_migrations()` checks
//! the current version and applies only the new ones sequentially.

use libsql::Connection;

use crate::error::DataAccessError;

/// A single migration step.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new versions to the end.
static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                city TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL REFERENCES customers(id),
                issue TEXT NOT NULL,
                status TEXT NOT NULL,
                opened_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_tickets_customer ON tickets(customer_id);
        "#,
    },
    Migration {
        version: 2,
        name: "seed_demo_dataset",
        sql: r#"
            INSERT OR IGNORE INTO customers (id, name, city) VALUES
                (1, 'John', 'Berlin'),
                (2, 'Alice', 'Lisbon'),
                (3, 'Maria', 'Porto');

            INSERT OR IGNORE INTO tickets (id, customer_id, issue, status) VALUES
                (1, 1, 'Cannot log in to my account', 'open'),
                (2, 1, 'Refund not processed', 'escalated'),
                (3, 2, 'App crashes on startup', 'closed');
        "#,
    },
];

/// Apply all pending migrations.
pub async fn run_migrations(conn: &Connection) -> Result<(), DataAccessError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        (),
    )
    .await
    .map_err(|e| DataAccessError::Query(format!("Failed to create migrations table: {e}")))?;

    let current = current_version(conn).await?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        conn.execute_batch(migration.sql)
            .await
            .map_err(|e| {
                DataAccessError::Query(format!(
                    "Migration {} ({}) failed: {e}",
                    migration.version, migration.name
                ))
            })?;

        conn.execute(
            "INSERT INTO _migrations (version, name) VALUES (?, ?)",
            libsql::params![migration.version, migration.name],
        )
        .await
        .map_err(|e| {
            DataAccessError::Query(format!(
                "Failed to record migration {}: {e}",
                migration.version
            ))
        })?;

        tracing::debug!(
            version = migration.version,
            name = migration.name,
            "Applied migration"
        );
    }

    Ok(())
}

/// Highest applied migration version, or 0 for a fresh database.
async fn current_version(conn: &Connection) -> Result<i64, DataAccessError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
        .await
        .map_err(|e| DataAccessError::Query(format!("Failed to read migration version: {e}")))?;

    match rows
        .next()
        .await
        .map_err(|e| DataAccessError::Query(e.to_string()))?
    {
        Some(row) => row
            .get::<i64>(0)
            .map_err(|e| DataAccessError::Decode(e.to_string())),
        None => Ok(0),
    }
}
