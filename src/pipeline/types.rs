//! Shared types for the request pipeline.

use serde::{Deserialize, Serialize};

/// Maximum retained conversation history entries.
pub const HISTORY_CAP: usize = 10;

// ── Route ───────────────────────────────────────────────────────────

/// The handler selected for a request.
///
/// A closed set — dispatch is an exhaustive `match`, never string
/// comparison, so adding a route without wiring a handler fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Guidance and policy questions answered from the article corpus.
    KnowledgeSearch,
    /// Customer and ticket lookups against the backing store.
    RecordLookup,
    /// Weather and price questions answered by the mock backend.
    ExternalInfo,
    /// No handler — render straight from the absent-result fallbacks.
    DirectAnswer,
}

impl Route {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::KnowledgeSearch => "knowledge_search",
            Self::RecordLookup => "record_lookup",
            Self::ExternalInfo => "external_info",
            Self::DirectAnswer => "direct_answer",
        }
    }
}

// ── Structured results ──────────────────────────────────────────────

/// A single result row: ordered column → scalar value mapping.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// An ordered set of rows from the backing store.
///
/// Empty is a valid, non-error result — it renders as "no data found".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSet {
    pub rows: Vec<Row>,
    pub row_count: usize,
}

impl RowSet {
    /// Build a row set; the count always mirrors the row vector.
    pub fn new(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self { rows, row_count }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A corpus document with its similarity score, already threshold-filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub content: String,
    pub score: f32,
}

/// Tagged union of everything a handler can produce.
///
/// The renderer dispatches on this tag, not on the route that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredResult {
    /// Rows from the record store, ranked in query order.
    Rows(RowSet),
    /// Corpus documents ranked descending by score.
    Documents(Vec<ScoredDocument>),
    /// A single precomputed string plus its provenance tag.
    Scalar { text: String, source: String },
}

impl StructuredResult {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::Documents(_) => "documents",
            Self::Scalar { .. } => "scalar",
        }
    }
}

// ── Conversation history ────────────────────────────────────────────

/// Bounded buffer of prior message strings, newest last.
///
/// Owned by the transport layer across requests; the pipeline only reads a
/// snapshot. Data model only — no routing logic looks inside it today.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    entries: Vec<String>,
    cap: usize,
}

impl ConversationHistory {
    /// Create an empty history with the given cap.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    /// Append an entry, dropping the oldest when over the cap.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > self.cap {
            let overflow = self.entries.len() - self.cap;
            self.entries.drain(..overflow);
        }
    }

    /// Snapshot the current entries for one pipeline pass.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAP)
    }
}

// ── Request state ───────────────────────────────────────────────────

/// The single state object threaded through one pipeline pass.
///
/// Fields are write-once in pipeline order: `route`, then
/// `structured_result`, then `final_answer`. The setters assert that order
/// in debug builds; no stage may rewrite an earlier stage's field.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub message: String,
    pub history: Vec<String>,
    pub route: Option<Route>,
    pub structured_result: Option<StructuredResult>,
    pub final_answer: Option<String>,
}

impl RequestState {
    /// Create fresh state for one incoming message.
    pub fn new(message: impl Into<String>, history: &[String]) -> Self {
        Self {
            message: message.into(),
            history: history.to_vec(),
            route: None,
            structured_result: None,
            final_answer: None,
        }
    }

    /// Record the classified route. Write-once.
    pub fn set_route(&mut self, route: Route) {
        debug_assert!(self.route.is_none(), "route already set");
        self.route = Some(route);
    }

    /// Record the dispatch outcome. Write-once, after `set_route`.
    pub fn set_result(&mut self, result: Option<StructuredResult>) {
        debug_assert!(self.route.is_some(), "result set before route");
        debug_assert!(self.structured_result.is_none(), "result already set");
        self.structured_result = result;
    }

    /// Record the rendered answer. Write-once, terminal.
    pub fn set_answer(&mut self, answer: String) {
        debug_assert!(self.final_answer.is_none(), "answer already set");
        self.final_answer = Some(answer);
    }
}
