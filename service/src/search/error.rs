use an_parse::ParseError;
use thiserror::Error;

/// Errors that can occur while querying the search endpoints.
///
/// None of these are retried; a failure on any page ends the iteration
/// that requested it.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response body is not JSON
    #[error("malformed JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response body does not have the expected layout
    #[error("malformed search result: {0}")]
    Parse(#[from] ParseError),

    /// A configured URL or a server-supplied link could not be resolved
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Page size must be at least one to paginate
    #[error("page size must be at least 1")]
    InvalidPageSize,
}
