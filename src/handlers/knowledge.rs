//! Knowledge-search handler — semantic search over the static corpus.
//!
//! Corpus embeddings are computed once at construction and cached; after
//! that the handler is read-only and shared freely across requests.
//! Scoring is explicit cosine similarity, so identical message text always
//! produces identical ranking and scores.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::corpus::ARTICLES;
use crate::embedding::{Embedder, cosine_similarity};
use crate::error::{EmbeddingError, HandlerError};
use crate::handlers::Handler;
use crate::pipeline::types::{ScoredDocument, StructuredResult};

/// Maximum documents returned per query.
const TOP_K: usize = 3;

/// Minimum similarity for a document to count as relevant.
const MIN_SIMILARITY: f32 = 0.35;

/// A corpus article with its cached embedding.
struct CorpusEntry {
    content: &'static str,
    embedding: Vec<f32>,
}

/// Handler for guidance and policy questions.
pub struct KnowledgeSearchHandler {
    embedder: Arc<dyn Embedder>,
    entries: Vec<CorpusEntry>,
}

impl KnowledgeSearchHandler {
    /// Embed the corpus once and build the handler.
    pub async fn load(embedder: Arc<dyn Embedder>) -> Result<Self, EmbeddingError> {
        let mut entries = Vec::with_capacity(ARTICLES.len());
        for article in ARTICLES {
            let embedding = embedder.embed(article.content).await?;
            entries.push(CorpusEntry {
                content: article.content,
                embedding,
            });
        }
        info!(
            articles = entries.len(),
            model = embedder.model_name(),
            "Knowledge corpus embedded"
        );
        Ok(Self { embedder, entries })
    }

    /// Rank the corpus against a query, keeping entries at or above the
    /// relevance threshold. Equal scores preserve corpus insertion order.
    async fn search(&self, query: &str) -> Result<Vec<ScoredDocument>, EmbeddingError> {
        let query_embedding = self.embedder.embed(query).await?;

        let mut scored: Vec<ScoredDocument> = self
            .entries
            .iter()
            .map(|entry| ScoredDocument {
                content: entry.content.to_string(),
                score: cosine_similarity(&entry.embedding, &query_embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.retain(|doc| doc.score >= MIN_SIMILARITY);
        scored.truncate(TOP_K);

        debug!(matches = scored.len(), "Corpus search complete");
        Ok(scored)
    }
}

#[async_trait]
impl Handler for KnowledgeSearchHandler {
    fn name(&self) -> &'static str {
        "knowledge_search"
    }

    async fn attempt(&self, message: &str) -> Result<Option<StructuredResult>, HandlerError> {
        let documents = self.search(message).await?;
        if documents.is_empty() {
            return Ok(None);
        }
        Ok(Some(StructuredResult::Documents(documents)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Embedder with hand-set vectors per text; unknown texts embed to zero.
    struct FixtureEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl FixtureEmbedder {
        fn new(pairs: &[(&str, &[f32])]) -> Self {
            Self {
                vectors: pairs
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Embedder for FixtureEmbedder {
        fn model_name(&self) -> &str {
            "fixture"
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(self
                .vectors
                .get(text)
                .cloned()
                .unwrap_or_else(|| vec![0.0, 0.0, 0.0]))
        }
    }

    const PASSWORD_QUERY: &str = "How do I reset my password?";

    /// Corpus order: password reset, escalation policy, refund policy.
    fn fixture() -> FixtureEmbedder {
        FixtureEmbedder::new(&[
            (ARTICLES[0].content, &[1.0, 0.0, 0.0]),
            (ARTICLES[1].content, &[0.0, 1.0, 0.0]),
            (ARTICLES[2].content, &[0.0, 0.0, 1.0]),
            (PASSWORD_QUERY, &[0.9, 0.1, 0.0]),
            ("What is your refund policy?", &[0.0, 0.2, 0.95]),
        ])
    }

    async fn handler_with(embedder: FixtureEmbedder) -> KnowledgeSearchHandler {
        KnowledgeSearchHandler::load(Arc::new(embedder)).await.unwrap()
    }

    #[tokio::test]
    async fn password_query_ranks_password_article_first() {
        let handler = handler_with(fixture()).await;
        let result = handler.attempt(PASSWORD_QUERY).await.unwrap();
        match result {
            Some(StructuredResult::Documents(docs)) => {
                assert_eq!(docs[0].content, ARTICLES[0].content);
                assert!(docs[0].score > MIN_SIMILARITY);
            }
            other => panic!("expected documents, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refund_query_ranks_refund_article_first() {
        let handler = handler_with(fixture()).await;
        let result = handler
            .attempt("What is your refund policy?")
            .await
            .unwrap();
        match result {
            Some(StructuredResult::Documents(docs)) => {
                assert_eq!(docs[0].content, ARTICLES[2].content);
            }
            other => panic!("expected documents, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn irrelevant_query_misses() {
        let handler = handler_with(fixture()).await;
        let result = handler.attempt("How do airplanes fly?").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn below_threshold_documents_are_dropped() {
        let handler = handler_with(fixture()).await;
        let result = handler.attempt(PASSWORD_QUERY).await.unwrap();
        let Some(StructuredResult::Documents(docs)) = result else {
            panic!("expected documents");
        };
        // Only the password article clears 0.35 for this query vector.
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn identical_queries_produce_identical_scores() {
        let handler = handler_with(fixture()).await;
        let first = handler.search(PASSWORD_QUERY).await.unwrap();
        let second = handler.search(PASSWORD_QUERY).await.unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.content, b.content);
            assert_eq!(a.score, b.score);
        }
    }

    #[tokio::test]
    async fn equal_scores_preserve_corpus_insertion_order() {
        // First two articles share a vector, so any query scores them
        // identically; the password article must still come first.
        let embedder = FixtureEmbedder::new(&[
            (ARTICLES[0].content, &[1.0, 0.0, 0.0]),
            (ARTICLES[1].content, &[1.0, 0.0, 0.0]),
            (ARTICLES[2].content, &[0.0, 0.0, 1.0]),
            ("tied query", &[1.0, 0.0, 0.0]),
        ]);
        let handler = handler_with(embedder).await;
        let docs = handler.search("tied query").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, ARTICLES[0].content);
        assert_eq!(docs[1].content, ARTICLES[1].content);
        assert_eq!(docs[0].score, docs[1].score);
    }

    #[tokio::test]
    async fn results_are_capped_at_top_k() {
        // Every article matches the query exactly.
        let embedder = FixtureEmbedder::new(&[
            (ARTICLES[0].content, &[1.0, 0.0, 0.0]),
            (ARTICLES[1].content, &[1.0, 0.0, 0.0]),
            (ARTICLES[2].content, &[1.0, 0.0, 0.0]),
            ("broad query", &[1.0, 0.0, 0.0]),
        ]);
        let handler = handler_with(embedder).await;
        let docs = handler.search("broad query").await.unwrap();
        assert_eq!(docs.len(), TOP_K.min(ARTICLES.len()));
    }
}
