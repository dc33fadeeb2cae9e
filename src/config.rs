//! Environment-driven configuration.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::pipeline::HISTORY_CAP;

/// Default embedding model when `DESK_EMBED_MODEL` is unset.
const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";

/// Top-level runtime configuration.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Database path; `:memory:` selects an in-memory database.
    pub db_path: String,
    /// Port for the HTTP chat endpoint.
    pub http_port: u16,
    /// Maximum retained conversation history entries.
    pub history_cap: usize,
    /// Embedding backend settings.
    pub embedding: EmbedConfig,
}

/// Configuration for the embedding backend.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl DeskConfig {
    /// Load configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model =
            std::env::var("DESK_EMBED_MODEL").unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());

        let db_path =
            std::env::var("DESK_DB_PATH").unwrap_or_else(|_| "./data/support-desk.db".to_string());

        let http_port = match std::env::var("DESK_HTTP_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "DESK_HTTP_PORT".to_string(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => 8000,
        };

        let history_cap = match std::env::var("DESK_HISTORY_CAP") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "DESK_HISTORY_CAP".to_string(),
                message: format!("not a valid length: {raw}"),
            })?,
            Err(_) => HISTORY_CAP,
        };

        Ok(Self {
            db_path,
            http_port,
            history_cap,
            embedding: EmbedConfig {
                api_key: SecretString::from(api_key),
                model,
            },
        })
    }
}
