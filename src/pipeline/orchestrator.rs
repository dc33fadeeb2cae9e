//! Pipeline orchestrator — one request, one pass.
//!
//! States: Classify → Dispatch → Render → Done, each visited exactly once.
//! The direct-answer route skips dispatch entirely. Hard handler errors
//! abort the pass and surface to the caller; soft misses (`Ok(None)`)
//! continue into the fallback render path.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::handlers::Handler;
use crate::pipeline::classifier::classify;
use crate::pipeline::renderer::render;
use crate::pipeline::types::{RequestState, Route};

/// Wires classifier → handler → renderer.
///
/// Owns no per-request state: everything a pass needs lives in the
/// `RequestState` created inside `submit`, shared collaborators are behind
/// `Arc` and read-only across concurrent requests.
pub struct Pipeline {
    records: Arc<dyn Handler>,
    knowledge: Arc<dyn Handler>,
    external: Arc<dyn Handler>,
}

impl Pipeline {
    /// Create a pipeline with one handler bound to each non-direct route.
    pub fn new(
        records: Arc<dyn Handler>,
        knowledge: Arc<dyn Handler>,
        external: Arc<dyn Handler>,
    ) -> Self {
        Self {
            records,
            knowledge,
            external,
        }
    }

    /// The handler bound to a route; `None` for the direct-answer route.
    fn handler_for(&self, route: Route) -> Option<&dyn Handler> {
        match route {
            Route::RecordLookup => Some(self.records.as_ref()),
            Route::KnowledgeSearch => Some(self.knowledge.as_ref()),
            Route::ExternalInfo => Some(self.external.as_ref()),
            Route::DirectAnswer => None,
        }
    }

    /// Run one full request/response cycle.
    pub async fn submit(&self, message: &str, history: &[String]) -> Result<String> {
        let mut state = RequestState::new(message, history);

        // Classify
        let route = classify(&state.message, &state.history);
        state.set_route(route);
        debug!(route = route.label(), "Classified request");

        // Dispatch — skipped for the direct-answer route
        let result = match self.handler_for(route) {
            Some(handler) => {
                let result = handler.attempt(&state.message).await?;
                match &result {
                    Some(r) => debug!(
                        handler = handler.name(),
                        shape = r.label(),
                        "Handler produced result"
                    ),
                    None => debug!(handler = handler.name(), "Handler extraction miss"),
                }
                result
            }
            None => None,
        };
        state.set_result(result);

        // Render
        let answer = render(&state.message, state.structured_result.as_ref());
        state.set_answer(answer.clone());

        info!(
            route = route.label(),
            answered = !answer.is_empty(),
            "Request complete"
        );
        Ok(answer)
    }
}
