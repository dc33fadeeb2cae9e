//! Record-lookup handler — customer and ticket queries against the store.
//!
//! Extraction is a set of small explicit parsers over the lowercased
//! message, tried in a fixed order; every non-match is a soft miss, never
//! an error. All SQL is parameterized SELECT text — the store enforces the
//! read-only invariant a second time before executing.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::error::HandlerError;
use crate::handlers::Handler;
use crate::pipeline::types::StructuredResult;
use crate::store::{SqlParam, SupportStore};

const TICKET_BY_ID: &str = "SELECT id, issue, status FROM tickets WHERE id = ?";

const CUSTOMER_BY_ID: &str = "SELECT name, city FROM customers WHERE id = ?";

const TICKETS_BY_CUSTOMER_NAME: &str = "SELECT t.id, t.issue, t.status
     FROM tickets t
     JOIN customers c ON t.customer_id = c.id
     WHERE c.name = ?";

/// Handler for entity lookups against the backing store.
pub struct RecordLookupHandler {
    store: Arc<dyn SupportStore>,
    /// Matches `ticket 42`, `ticket #42`, `ticket#42`.
    ticket_id: Regex,
    /// Matches `customer 2`, `customer2`.
    customer_id: Regex,
}

impl RecordLookupHandler {
    /// Create a handler over the given store.
    pub fn new(store: Arc<dyn SupportStore>) -> Self {
        Self {
            store,
            ticket_id: Regex::new(r"ticket\s*#?(\d+)").expect("Invalid ticket id regex"),
            customer_id: Regex::new(r"customer\s*(\d+)").expect("Invalid customer id regex"),
        }
    }
}

#[async_trait]
impl Handler for RecordLookupHandler {
    fn name(&self) -> &'static str {
        "record_lookup"
    }

    async fn attempt(&self, message: &str) -> Result<Option<StructuredResult>, HandlerError> {
        let text = message.to_lowercase();

        // 1. Ticket status by id
        if text.contains("ticket")
            && let Some(id) = capture_int(&self.ticket_id, &text)
        {
            debug!(ticket_id = id, "Looking up ticket by id");
            let rows = self
                .store
                .run_select(TICKET_BY_ID, &[SqlParam::Int(id)])
                .await?;
            return Ok(Some(StructuredResult::Rows(rows)));
        }

        // 2. Customer city/location by numeric id
        if (text.contains("city") || text.contains("from"))
            && let Some(id) = capture_int(&self.customer_id, &text)
        {
            debug!(customer_id = id, "Looking up customer by id");
            let rows = self
                .store
                .run_select(CUSTOMER_BY_ID, &[SqlParam::Int(id)])
                .await?;
            return Ok(Some(StructuredResult::Rows(rows)));
        }

        // 3. Tickets by customer name
        if text.contains("customer") {
            return match extract_customer_name(&text) {
                Some(name) => {
                    debug!(customer = %name, "Looking up tickets by customer name");
                    let rows = self
                        .store
                        .run_select(TICKETS_BY_CUSTOMER_NAME, &[SqlParam::Text(name)])
                        .await?;
                    Ok(Some(StructuredResult::Rows(rows)))
                }
                None => Ok(None),
            };
        }

        Ok(None)
    }
}

/// First capture group of `re` in `text`, parsed as an integer.
fn capture_int(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// The text after the first "customer", punctuation stripped, title-cased.
///
/// Exact-equality matching against the normalized name is a known fragility:
/// partial or differently-cased names miss and render as an empty row set.
fn extract_customer_name(text: &str) -> Option<String> {
    let (_, after) = text.split_once("customer")?;
    let cleaned: String = after.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let name = title_case(cleaned.trim());
    if name.is_empty() { None } else { Some(name) }
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::StructuredResult;
    use crate::store::LibSqlStore;

    async fn handler() -> RecordLookupHandler {
        let store = Arc::new(LibSqlStore::new_memory().await.unwrap());
        RecordLookupHandler::new(store)
    }

    fn rows(result: Option<StructuredResult>) -> crate::pipeline::types::RowSet {
        match result {
            Some(StructuredResult::Rows(set)) => set,
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn title_case_normalizes_words() {
        assert_eq!(title_case("john"), "John");
        assert_eq!(title_case("john doe"), "John Doe");
        assert_eq!(title_case("JOHN"), "John");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn name_extraction_strips_punctuation() {
        assert_eq!(
            extract_customer_name("show tickets for customer john."),
            Some("John".to_string())
        );
        assert_eq!(
            extract_customer_name("customer alice!"),
            Some("Alice".to_string())
        );
    }

    #[test]
    fn name_extraction_misses_when_nothing_follows() {
        assert_eq!(extract_customer_name("tell me about customer"), None);
        assert_eq!(extract_customer_name("customer   "), None);
        assert_eq!(extract_customer_name("no keyword here"), None);
    }

    #[tokio::test]
    async fn ticket_by_id() {
        let handler = handler().await;
        let set = rows(handler
            .attempt("What is the status of ticket 2?")
            .await
            .unwrap());
        assert_eq!(set.row_count, 1);
        assert_eq!(set.rows[0]["id"], 2);
        assert_eq!(set.rows[0]["issue"], "Refund not processed");
        assert_eq!(set.rows[0]["status"], "escalated");
    }

    #[tokio::test]
    async fn ticket_by_id_accepts_hash_prefix() {
        let handler = handler().await;
        let set = rows(handler.attempt("show ticket #1").await.unwrap());
        assert_eq!(set.row_count, 1);
        assert_eq!(set.rows[0]["id"], 1);
    }

    #[tokio::test]
    async fn customer_city_by_numeric_id() {
        let handler = handler().await;
        let set = rows(handler
            .attempt("Where is customer 2 from?")
            .await
            .unwrap());
        assert_eq!(set.row_count, 1);
        assert_eq!(set.rows[0]["name"], "Alice");
        assert_eq!(set.rows[0]["city"], "Lisbon");
    }

    #[tokio::test]
    async fn tickets_by_customer_name() {
        let handler = handler().await;
        let set = rows(handler
            .attempt("Show tickets for customer John")
            .await
            .unwrap());
        assert_eq!(set.row_count, 2);
        assert!(set.rows.iter().all(|r| r.contains_key("issue")));
    }

    #[tokio::test]
    async fn unknown_customer_name_yields_empty_rows_not_miss() {
        let handler = handler().await;
        let set = rows(handler
            .attempt("Show tickets for customer Zed")
            .await
            .unwrap());
        assert_eq!(set.row_count, 0);
    }

    #[tokio::test]
    async fn bare_customer_keyword_is_a_soft_miss() {
        let handler = handler().await;
        let result = handler.attempt("tell me about customer").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn no_recognized_pattern_is_a_soft_miss() {
        let handler = handler().await;
        let result = handler.attempt("what is the account status").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn ticket_keyword_without_id_falls_through_to_name_lookup() {
        let handler = handler().await;
        let set = rows(handler
            .attempt("list open tickets for customer alice")
            .await
            .unwrap());
        assert_eq!(set.row_count, 1);
        assert_eq!(set.rows[0]["issue"], "App crashes on startup");
    }

    #[tokio::test]
    async fn missing_ticket_id_yields_empty_rows() {
        let handler = handler().await;
        let set = rows(handler.attempt("status of ticket 999").await.unwrap());
        assert_eq!(set.row_count, 0);
    }
}
