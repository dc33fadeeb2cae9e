//! External-info handler — canned weather and price responses.
//!
//! Simulates external lookups with fixed text; there is no live network
//! call. Backend selection is an internal sub-policy, separate from the
//! top-level classifier.

use async_trait::async_trait;
use tracing::debug;

use crate::error::HandlerError;
use crate::handlers::Handler;
use crate::pipeline::types::StructuredResult;

/// Keywords that select the price backend; everything else routed here
/// gets weather.
const PRICE_KEYWORDS: &[&str] = &["bitcoin", "btc", "crypto", "price"];

const WEATHER_RESPONSE: &str = "The weather today is sunny with a temperature of 25°C.";
const PRICE_RESPONSE: &str = "Bitcoin price is $30,000.";

/// Provenance tag on every canned response.
const MOCK_SOURCE: &str = "mock";

/// Handler for weather and price questions.
pub struct ExternalInfoHandler;

impl ExternalInfoHandler {
    pub fn new() -> Self {
        Self
    }

    /// Backend identifier for a (lowercased) message routed here.
    fn backend_for(text: &str) -> &'static str {
        if PRICE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            "price"
        } else {
            "weather"
        }
    }

    /// Canned response for a backend identifier.
    ///
    /// Unrecognized identifiers yield `None` — a soft miss, not an error.
    pub fn respond(&self, backend: &str) -> Option<StructuredResult> {
        let text = match backend.to_lowercase().as_str() {
            "weather" => WEATHER_RESPONSE,
            "price" => PRICE_RESPONSE,
            _ => return None,
        };
        Some(StructuredResult::Scalar {
            text: text.to_string(),
            source: MOCK_SOURCE.to_string(),
        })
    }
}

impl Default for ExternalInfoHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for ExternalInfoHandler {
    fn name(&self) -> &'static str {
        "external_info"
    }

    async fn attempt(&self, message: &str) -> Result<Option<StructuredResult>, HandlerError> {
        let text = message.to_lowercase();
        let backend = Self::backend_for(&text);
        debug!(backend, "Selected external backend");
        Ok(self.respond(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(result: Option<StructuredResult>) -> (String, String) {
        match result {
            Some(StructuredResult::Scalar { text, source }) => (text, source),
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn weather_message_gets_weather_response() {
        let handler = ExternalInfoHandler::new();
        let (text, source) = scalar(handler.attempt("What is the weather today?").await.unwrap());
        assert_eq!(text, WEATHER_RESPONSE);
        assert_eq!(source, MOCK_SOURCE);
    }

    #[tokio::test]
    async fn crypto_message_gets_price_response() {
        let handler = ExternalInfoHandler::new();
        let (text, _) = scalar(handler.attempt("Bitcoin price right now").await.unwrap());
        assert_eq!(text, PRICE_RESPONSE);
    }

    #[tokio::test]
    async fn price_keyword_alone_selects_price_backend() {
        let handler = ExternalInfoHandler::new();
        let (text, _) = scalar(handler.attempt("what is the PRICE of eggs").await.unwrap());
        assert_eq!(text, PRICE_RESPONSE);
    }

    #[tokio::test]
    async fn temperature_message_defaults_to_weather() {
        let handler = ExternalInfoHandler::new();
        let (text, _) = scalar(handler.attempt("what temperature is it outside").await.unwrap());
        assert_eq!(text, WEATHER_RESPONSE);
    }

    #[test]
    fn unrecognized_backend_yields_none() {
        let handler = ExternalInfoHandler::new();
        assert!(handler.respond("sports").is_none());
    }

    #[test]
    fn backend_identifiers_are_case_insensitive() {
        let handler = ExternalInfoHandler::new();
        assert!(handler.respond("Weather").is_some());
        assert!(handler.respond("PRICE").is_some());
    }
}
