//! Embedding integration for the knowledge-search handler.
//!
//! Uses the rig-core crate for provider transport and the `RigEmbedder`
//! adapter to bridge rig's `EmbeddingModel` trait to our dyn-safe
//! `Embedder` trait.

mod rig_adapter;

pub use rig_adapter::RigEmbedder;

use std::sync::Arc;

use async_trait::async_trait;
use rig::client::EmbeddingsClient;
use secrecy::ExposeSecret;

use crate::config::EmbedConfig;
use crate::error::EmbeddingError;

/// Dyn-safe embedding interface.
///
/// Implementations must be deterministic: the same text always maps to the
/// same vector for the lifetime of the embedder.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Embed a single text into the model's vector space.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm, so degenerate inputs rank
/// below any real match instead of producing NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Create an embedder from configuration.
pub fn create_embedder(config: &EmbedConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.api_key.expose_secret()).map_err(|e| {
            EmbeddingError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    let model = client.embedding_model(&config.model);
    tracing::info!("Using OpenAI embeddings (model: {})", config.model);
    Ok(Arc::new(RigEmbedder::new(model, &config.model)))
}
