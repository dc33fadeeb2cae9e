//! Adapter bridging rig's `EmbeddingModel` trait to our `Embedder` trait.
//!
//! rig's trait is not object-safe, so the adapter is generic over the model
//! and exposed behind `Arc<dyn Embedder>`.

use async_trait::async_trait;
use rig::embeddings::EmbeddingModel;

use crate::embedding::Embedder;
use crate::error::EmbeddingError;

/// Wraps a rig embedding model.
pub struct RigEmbedder<M: EmbeddingModel> {
    model: M,
    model_name: String,
}

impl<M: EmbeddingModel> RigEmbedder<M> {
    /// Create a new adapter for a rig embedding model.
    pub fn new(model: M, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
        }
    }
}

#[async_trait]
impl<M: EmbeddingModel> Embedder for RigEmbedder<M> {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let embedding =
            self.model
                .embed_text(text)
                .await
                .map_err(|e| EmbeddingError::RequestFailed {
                    provider: self.model_name.clone(),
                    reason: e.to_string(),
                })?;

        if embedding.vec.is_empty() {
            return Err(EmbeddingError::EmptyEmbedding {
                provider: self.model_name.clone(),
            });
        }

        Ok(embedding.vec.iter().map(|v| *v as f32).collect())
    }
}
