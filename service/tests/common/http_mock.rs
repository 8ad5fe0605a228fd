//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing. Use it to stand in for the search endpoints in
//! integration tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_search() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/recherche/query_amendements")
//!         .with_query_param("rows", "100")
//!         .respond_with_json(json!({"infoGenerales": {...}}))
//!         .mount()
//!         .await;
//!
//!     // Point the client at server.url("/recherche/query_amendements")
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(5))`
//! - **Request verification**: `.expect_times(1)`, then `server.verify().await`

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{
    body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Server root without a trailing slash, e.g. `http://127.0.0.1:4242`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server.uri())
    }

    /// Underlying `wiremock` server, for matchers this wrapper does not cover.
    pub const fn inner(&self) -> &MockServer {
        &self.server
    }

    pub fn expect_get(&self, route: &str) -> StubBuilder<'_> {
        self.expect("GET", route)
    }

    pub fn expect_post(&self, route: &str) -> StubBuilder<'_> {
        self.expect("POST", route)
    }

    fn expect(&self, verb: &str, route: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            mock: Mock::given(method(verb)).and(path(route)),
            response: ResponseTemplate::new(200),
            times: None,
        }
    }

    /// Check every `expect_times` expectation mounted so far.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Requests received so far.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Stub under construction; nothing is served until [`StubBuilder::mount`].
pub struct StubBuilder<'a> {
    server: &'a MockServer,
    mock: MockBuilder,
    response: ResponseTemplate,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    pub fn with_query_param(mut self, name: &str, value: &str) -> Self {
        self.mock = self.mock.and(query_param(name, value));
        self
    }

    pub fn without_query_param(mut self, name: &str) -> Self {
        self.mock = self.mock.and(query_param_is_missing(name));
        self
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.mock = self.mock.and(header(name, value));
        self
    }

    /// Match requests whose raw body contains `needle` (form bodies are
    /// percent-encoded).
    pub fn with_body_containing(mut self, needle: &str) -> Self {
        self.mock = self.mock.and(body_string_contains(needle));
        self
    }

    pub fn respond_with_json(mut self, body: serde_json::Value) -> Self {
        self.response = self.response.set_body_json(body);
        self
    }

    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.response = self
            .response
            .set_body_raw(body.into(), "text/html; charset=utf-8");
        self
    }

    /// Reset the response to `status` with an empty body. Chain body setters
    /// after this one.
    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.response = ResponseTemplate::new(status);
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.response = self.response.set_delay(delay);
        self
    }

    pub const fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut mock = self.mock.respond_with(self.response);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
