//! Handler set — one backend per route, uniform attempt contract.

pub mod external;
pub mod knowledge;
pub mod records;

pub use external::ExternalInfoHandler;
pub use knowledge::KnowledgeSearchHandler;
pub use records::RecordLookupHandler;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::pipeline::types::StructuredResult;

/// A backend capable of attempting a structured result for a message.
///
/// `Ok(None)` is an extraction miss — the message didn't carry what the
/// handler needed, and the pipeline falls through to the insufficient-
/// information answer. `Err` is a hard failure that aborts the pass.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handler name, for logging.
    fn name(&self) -> &'static str;

    /// Attempt to produce a structured result for the message.
    async fn attempt(&self, message: &str) -> Result<Option<StructuredResult>, HandlerError>;
}
