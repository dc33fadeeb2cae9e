//! Persistence layer — read-only SQLite-backed lookups for the record handler.

pub mod migrations;
pub mod traits;

mod libsql_backend;

pub use libsql_backend::LibSqlStore;
pub use traits::{SqlParam, SupportStore, ensure_read_only};
