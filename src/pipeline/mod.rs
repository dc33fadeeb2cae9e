//! Request pipeline — classification, dispatch, and rendering.
//!
//! Every request makes exactly one pass:
//! 1. `classify()` — ordered keyword tiers pick a route
//! 2. handler dispatch — the route's handler attempts a structured result
//! 3. `render()` — the result's shape picks the answer format
//!
//! No retries, no loops. One message in, one handler invoked, one answer out.

pub mod classifier;
pub mod orchestrator;
pub mod renderer;
pub mod types;

pub use classifier::classify;
pub use orchestrator::Pipeline;
pub use renderer::render;
pub use types::{
    ConversationHistory, HISTORY_CAP, RequestState, Route, Row, RowSet, ScoredDocument,
    StructuredResult,
};
