//! Error types for the support desk.
//!
//! The taxonomy separates soft misses from hard failures. A handler that
//! cannot parse what it needs out of a message returns `Ok(None)` — that is
//! not an error and never appears here. Everything in this module is a hard
//! failure that aborts the current pipeline pass and surfaces to the caller.

/// Top-level error type for the support desk.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Data-access errors from the backing store.
#[derive(Debug, thiserror::Error)]
pub enum DataAccessError {
    #[error("Failed to open database: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error("Rejected non-read-only statement: {statement}")]
    UnsafeQuery { statement: String },
}

/// Embedding backend errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("Embedding request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned an empty embedding")]
    EmptyEmbedding { provider: String },
}

/// Hard failures raised by a handler's `attempt`.
///
/// Extraction misses are `Ok(None)`, not a `HandlerError` — only failures of
/// the collaborators behind a handler end up here.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Data access failed: {0}")]
    DataAccess(#[from] DataAccessError),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Result type alias for the support desk.
pub type Result<T> = std::result::Result<T, Error>;
