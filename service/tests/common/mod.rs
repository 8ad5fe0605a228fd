//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - declarative `wiremock` stubs for the
//!   search endpoints
//! - [`fixtures`] - response bodies in the formats the endpoints return

pub mod fixtures;
pub mod http_mock;
