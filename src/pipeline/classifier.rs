//! Rule-based route classifier.
//!
//! Tiers are evaluated in a fixed order and short-circuit at the first
//! match. The order is load-bearing: guidance phrasing is checked before
//! data-lookup keywords so that a question about the ticket escalation
//! *policy* is not captured by the "ticket" keyword.

use crate::pipeline::types::Route;

/// Tier 1: guidance/policy intent. Checked first.
const KNOWLEDGE_PHRASES: &[&str] = &[
    "how do i",
    "help",
    "policy",
    "guide",
    "support",
    "password",
    "reset",
    "refund",
    "escalation",
];

/// Tier 2: entity-lookup keywords.
const RECORD_KEYWORDS: &[&str] = &["customer", "ticket", "issue", "status", "account", "city"];

/// Tier 3: external weather/price keywords.
const EXTERNAL_KEYWORDS: &[&str] = &["weather", "temperature", "price", "crypto", "bitcoin"];

/// Classify a message into a route.
///
/// Pure and total: always returns a route, never fails. Matching is
/// case-insensitive substring containment — no tokenization, no stemming.
/// `history` is part of the signature for future context-sensitivity; the
/// current policy does not read it.
pub fn classify(message: &str, _history: &[String]) -> Route {
    let text = message.to_lowercase();

    if contains_any(&text, KNOWLEDGE_PHRASES) {
        return Route::KnowledgeSearch;
    }
    if contains_any(&text, RECORD_KEYWORDS) {
        return Route::RecordLookup;
    }
    if contains_any(&text, EXTERNAL_KEYWORDS) {
        return Route::ExternalInfo;
    }
    Route::DirectAnswer
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
