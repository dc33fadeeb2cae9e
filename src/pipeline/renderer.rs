//! Deterministic answer rendering.
//!
//! Dispatch is by the shape of the structured result, not by the route that
//! produced it — any handler returning rows renders like any other. The raw
//! message is consulted only for the absent-result fallbacks.

use crate::pipeline::types::{Row, RowSet, ScoredDocument, StructuredResult};

/// Rendered when a row set comes back empty.
const NO_DATA_ANSWER: &str = "No tickets or customer data found.";

/// Rendered when no handler produced a result.
const INSUFFICIENT_ANSWER: &str = "I don't have enough information to answer that.";

/// Rendered when the user asks what the system is.
const SELF_DESCRIPTION: &str = "I am an AI Support Desk system. I answer questions about \
     customers, tickets, support policies, and general information by routing requests \
     to verified internal tools.";

/// Phrases that select the self-description on the direct-answer path.
const SYSTEM_PHRASES: &[&str] = &["explain this system", "what can you do", "how do you work"];

/// Render a structured result (or its absence) into the final answer.
///
/// Pure and total. Precedence: row and document shapes first, then the
/// absent-result fallbacks.
pub fn render(message: &str, result: Option<&StructuredResult>) -> String {
    match result {
        Some(StructuredResult::Rows(set)) => render_rows(set),
        Some(StructuredResult::Documents(docs)) if !docs.is_empty() => render_document(&docs[0]),
        Some(StructuredResult::Scalar { text, .. }) => text.clone(),
        _ => render_fallback(message),
    }
}

fn render_rows(set: &RowSet) -> String {
    if set.is_empty() {
        return NO_DATA_ANSWER.to_string();
    }

    let first = &set.rows[0];
    if first.contains_key("issue") {
        return set
            .rows
            .iter()
            .map(|row| {
                format!(
                    "Ticket #{} — {} (Status: {})",
                    field_text(row, "id"),
                    field_text(row, "issue"),
                    field_text(row, "status"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
    }
    if first.contains_key("city") {
        return format!(
            "Customer {} is from {}.",
            field_text(first, "name"),
            field_text(first, "city"),
        );
    }

    // Rows of a shape no query produces. Treat as unanswerable rather than
    // inventing a format.
    INSUFFICIENT_ANSWER.to_string()
}

fn render_document(top: &ScoredDocument) -> String {
    // Strip a leading "Title:" style prefix.
    match top.content.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => top.content.clone(),
    }
}

fn render_fallback(message: &str) -> String {
    let text = message.to_lowercase();
    if SYSTEM_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return SELF_DESCRIPTION.to_string();
    }
    INSUFFICIENT_ANSWER.to_string()
}

/// Render one row field as plain text (no JSON quoting).
fn field_text(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
