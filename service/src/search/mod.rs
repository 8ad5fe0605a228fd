//! Assemblée nationale search clients.
//!
//! Provides paginating clients over the two public search endpoints of the
//! Assemblée nationale website.
//!
//! # Architecture
//!
//! - [`AmendementClient`] - amendment search, paginated by offset (`start`/`rows`)
//! - [`QuestionClient`] - written-question search, paginated by following
//!   the "next" link of each page
//! - [`SearchTransport`] - trait for the HTTP exchanges both clients perform
//! - [`HttpTransport`] - real HTTP implementation using reqwest
//! - [`mock::MockTransport`] - recording mock for unit tests (behind `test-utils` feature)
//!
//! Response bodies are handed to the `an_parse` crate, which turns them into
//! pages carrying a total count, the records and, for questions, the next link.
//!
//! # Paging
//!
//! `AmendementClient::iterator` and `QuestionClient::iter` fetch the first
//! page eagerly and return a cursor; each call to `next().await` fetches at
//! most one more page. The number of pages is bounded by the total reported
//! on the first page. Cursors can be turned into a `futures::Stream` with
//! `into_stream`.
//!
//! ```ignore
//! use assemblee_client::search::{AmendementClient, AmendementFilters};
//!
//! let client = AmendementClient::new();
//! let mut pages = client
//!     .iterator(&AmendementFilters::new().id_dossier_legislatif("33299"))
//!     .await?;
//! while let Some(page) = pages.next().await {
//!     for amendement in page?.results {
//!         println!("{} {}", amendement.num_amend, amendement.sort);
//!     }
//! }
//! ```
//!
//! # Testing Patterns
//!
//! Use `MockTransport` to drive the clients without a network:
//!
//! ```ignore
//! use assemblee_client::search::{mock::MockTransport, QuestionClient, QuestionQuery};
//!
//! let transport = MockTransport::new();
//! transport.push_response(search_url, first_page_html);
//! let client = QuestionClient::with_transport(transport, base_url, search_path);
//! let page = client.get(&QuestionQuery::new()).await?;
//! ```
//!
//! Integration tests run the real `HttpTransport` against a `wiremock` server.

mod amendement;
mod error;
mod filters;
mod progress;
mod question;
mod transport;

pub use amendement::{AmendementClient, AmendementPages, AMENDEMENT_SEARCH_URL};
pub use error::SearchError;
pub use filters::{AmendementFilters, DEFAULT_ROWS};
pub use progress::percent;
pub use question::{
    AnswerStatus, QuestionClient, QuestionPages, QuestionQuery, RemovalStatus, QUESTION_BASE_URL,
    QUESTION_SEARCH_PATH,
};
pub use transport::{HttpTransport, Params, RawResponse, SearchTransport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::mock;

pub use an_parse::{
    AmendementSearchResult, AmendementSummary, QuestionSearchResult, QuestionSummary, SearchPage,
};
