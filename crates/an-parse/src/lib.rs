//! Parsers for Assemblée nationale search results.
//!
//! The search endpoints answer in two shapes:
//!
//! - amendment search returns a JSON summary whose rows are `|`-separated
//!   strings described by a schema header ([`parse_amendements_summary`])
//! - written-question search returns an HTML page with a result table and a
//!   pagination block ([`parse_question_search_result`])
//!
//! Both produce a page type implementing [`SearchPage`], which is all the
//! paginating clients need to know about a response.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod amendement;
mod question;
mod text;

pub use amendement::{parse_amendements_summary, AmendementSearchResult, AmendementSummary};
pub use question::{parse_question_search_result, QuestionSearchResult, QuestionSummary};

/// Errors raised while turning a response body into a search page.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The JSON body does not have the expected summary layout.
    #[error("invalid amendement summary: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL in the response (or the response URL itself) could not be resolved.
    #[error("invalid URL in search result: {0}")]
    Url(#[from] url::ParseError),

    /// A CSS selector failed to compile.
    #[error("invalid selector {selector}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },

    /// A required element or column is absent.
    #[error("missing {0} in search result")]
    Missing(&'static str),

    /// The result count could not be read as a number.
    #[error("invalid result count: {0:?}")]
    InvalidCount(String),
}

/// One page of search results, as seen by a paginating client.
pub trait SearchPage {
    type Item;

    /// Number of matching items on the server, across all pages.
    fn total_count(&self) -> u64;

    /// Records carried by this page, in server order.
    fn results(&self) -> &[Self::Item];

    /// Relative link to the following page, when the server provides one.
    fn next_url(&self) -> Option<&str> {
        None
    }
}
