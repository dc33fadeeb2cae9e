//! Backend-agnostic store trait for the record-lookup handler.
//!
//! The store serves exactly one statement form: parameterized SELECTs over
//! the read-only `customers` and `tickets` relations. Anything else is
//! rejected before it reaches the database.

use async_trait::async_trait;

use crate::error::DataAccessError;
use crate::pipeline::types::RowSet;

/// A positional query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// Read-only query interface shared by all backends.
///
/// The backing connection is the only stateful resource crossing request
/// boundaries; it must support concurrent read-only queries and is never
/// written to outside migrations.
#[async_trait]
pub trait SupportStore: Send + Sync {
    /// Execute a parameterized SELECT and return its rows in query order.
    ///
    /// An empty result is `Ok` with an empty row set, never an error.
    async fn run_select(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<RowSet, DataAccessError>;
}

/// Reject any statement that does not begin with a read-only verb.
///
/// Hard safety invariant: the handler contract already guarantees SELECT-only
/// text, so a rejection here means a bug upstream, not a user error.
pub fn ensure_read_only(sql: &str) -> Result<(), DataAccessError> {
    let trimmed = sql.trim_start();
    if !trimmed.to_lowercase().starts_with("select") {
        return Err(DataAccessError::UnsafeQuery {
            statement: trimmed.chars().take(64).collect(),
        });
    }
    Ok(())
}
