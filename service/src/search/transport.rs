//! HTTP exchange seam used by the search clients.
//!
//! The clients only ever need two kinds of exchange: a GET with a query
//! string and a POST with a form body. Both hand back the final URL of the
//! response (after redirects) and the raw body; decoding is left to the
//! caller.

use std::time::Duration;

use async_trait::async_trait;

use super::SearchError;
use crate::config::SearchConfig;

/// Ordered `name=value` pairs, sent as a query string or as a form body.
pub type Params = Vec<(&'static str, String)>;

/// Body and final URL of a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub url: String,
    pub body: Vec<u8>,
}

/// Trait for the HTTP exchanges the search clients perform.
///
/// Use `HttpTransport` for real HTTP calls, or `mock::MockTransport` in tests.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// GET `url` with `query` appended as a query string.
    async fn get(&self, url: &str, query: &[(&'static str, String)])
        -> Result<RawResponse, SearchError>;

    /// POST `form` to `url` as `application/x-www-form-urlencoded`.
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<RawResponse, SearchError>;
}

/// `reqwest`-backed transport.
///
/// Do not wrap it in an `Arc`: [`reqwest::Client`] is already reference counted.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest::Client` (custom timeout, proxy, ...).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build the underlying client with the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns [`SearchError::Request`] if the TLS backend cannot be initialised.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, SearchError> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let url = response.url().to_string();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { url, body })
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<RawResponse, SearchError> {
        let response = self.client.get(url).query(query).send().await?;
        Self::read(response).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<RawResponse, SearchError> {
        let response = self.client.post(url).form(form).send().await?;
        Self::read(response).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Recording transport for unit tests.

    use super::{async_trait, RawResponse, SearchError, SearchTransport};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Method {
        Get,
        PostForm,
    }

    /// A request as seen by [`MockTransport`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedRequest {
        pub method: Method,
        pub url: String,
        pub params: Vec<(String, String)>,
    }

    impl RecordedRequest {
        /// Value of the first parameter called `name`.
        pub fn param(&self, name: &str) -> Option<&str> {
            self.params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    type Responder = Box<dyn Fn(&RecordedRequest) -> Result<RawResponse, SearchError> + Send + Sync>;

    /// Mock implementation of `SearchTransport`.
    ///
    /// Queued responses are served first, in order. Once the queue is empty
    /// the responder (if any) answers; otherwise the call fails with a 404
    /// `ApiError`. Every call is recorded.
    pub struct MockTransport {
        queue: Mutex<VecDeque<Result<RawResponse, SearchError>>>,
        responder: Option<Responder>,
        calls: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                queue: Mutex::new(VecDeque::new()),
                responder: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Answer every unqueued request with `responder`.
        pub fn with_responder<F>(responder: F) -> Self
        where
            F: Fn(&RecordedRequest) -> Result<RawResponse, SearchError> + Send + Sync + 'static,
        {
            Self {
                responder: Some(Box::new(responder)),
                ..Self::new()
            }
        }

        /// Queue a successful response.
        pub fn push_response(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
            self.push_result(Ok(RawResponse {
                url: url.into(),
                body: body.into(),
            }));
        }

        /// Queue an arbitrary result.
        pub fn push_result(&self, result: Result<RawResponse, SearchError>) {
            self.queue.lock().unwrap().push_back(result);
        }

        /// All requests made so far.
        pub fn calls(&self) -> Vec<RecordedRequest> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(
            &self,
            method: Method,
            url: &str,
            params: &[(&'static str, String)],
        ) -> Result<RawResponse, SearchError> {
            let request = RecordedRequest {
                method,
                url: url.to_string(),
                params: params
                    .iter()
                    .map(|(key, value)| ((*key).to_string(), value.clone()))
                    .collect(),
            };
            self.calls.lock().unwrap().push(request.clone());

            if let Some(queued) = self.queue.lock().unwrap().pop_front() {
                return queued;
            }
            match &self.responder {
                Some(responder) => responder(&request),
                None => Err(SearchError::ApiError {
                    status: 404,
                    message: format!("no mock response for {url}"),
                }),
            }
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SearchTransport for MockTransport {
        async fn get(
            &self,
            url: &str,
            query: &[(&'static str, String)],
        ) -> Result<RawResponse, SearchError> {
            self.answer(Method::Get, url, query)
        }

        async fn post_form(
            &self,
            url: &str,
            form: &[(&'static str, String)],
        ) -> Result<RawResponse, SearchError> {
            self.answer(Method::PostForm, url, form)
        }
    }
}
