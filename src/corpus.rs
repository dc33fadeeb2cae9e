//! Static knowledge corpus for the knowledge-search handler.
//!
//! Exactly three support articles, fixed at compile time. The corpus is
//! reference data — it is never edited at runtime, and insertion order is
//! the tie-break order for equal similarity scores.

/// A single support article.
#[derive(Debug, Clone, Copy)]
pub struct Article {
    pub title: &'static str,
    pub content: &'static str,
}

/// The full article set, in canonical order.
pub static ARTICLES: &[Article] = &[
    Article {
        title: "Password Reset Guide",
        content: "How to reset your password: click 'Forgot Password', \
                  enter your email, and follow the reset link.",
    },
    Article {
        title: "Ticket Escalation Policy",
        content: "Tickets are escalated if unresolved for more than 48 hours. \
                  Escalated tickets are reviewed by senior support staff.",
    },
    Article {
        title: "Refund Policy",
        content: "Refunds are available within 14 days of purchase \
                  if the service was not used.",
    },
];
