//! Written-question search client.
//!
//! Unlike the amendment search, the question search does not take an
//! offset: the first page is requested with a form POST and every following
//! page is reached through the "next" link printed on the previous one.

use std::time::Instant;

use an_parse::{parse_question_search_result, QuestionSearchResult};
use futures::Stream;
use url::Url;

use super::progress;
use super::transport::{HttpTransport, Params, SearchTransport};
use super::SearchError;
use crate::config::SearchConfig;

/// Default site root; follow-up links are resolved against it.
pub const QUESTION_BASE_URL: &str = "http://www2.assemblee-nationale.fr/";

/// Default search path, relative to [`QUESTION_BASE_URL`].
pub const QUESTION_SEARCH_PATH: &str = "recherche/resultats_questions";

/// Filter on whether a question has been answered.
///
/// | variant      | `replies[]` |
/// |--------------|-------------|
/// | `Any`        | not sent    |
/// | `Answered`   | `ar`        |
/// | `Unanswered` | `sr`        |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerStatus {
    #[default]
    Any,
    Answered,
    Unanswered,
}

impl AnswerStatus {
    #[must_use]
    pub const fn wire_value(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Answered => Some("ar"),
            Self::Unanswered => Some("sr"),
        }
    }
}

impl From<Option<bool>> for AnswerStatus {
    fn from(answered: Option<bool>) -> Self {
        match answered {
            None => Self::Any,
            Some(true) => Self::Answered,
            Some(false) => Self::Unanswered,
        }
    }
}

/// Filter on whether a question has been withdrawn.
///
/// | variant      | `removed[]` |
/// |--------------|-------------|
/// | `Any`        | not sent    |
/// | `Removed`    | `1`         |
/// | `NotRemoved` | `0`         |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalStatus {
    #[default]
    Any,
    Removed,
    NotRemoved,
}

impl RemovalStatus {
    #[must_use]
    pub const fn wire_value(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Removed => Some("1"),
            Self::NotRemoved => Some("0"),
        }
    }
}

impl From<Option<bool>> for RemovalStatus {
    fn from(removed: Option<bool>) -> Self {
        match removed {
            None => Self::Any,
            Some(true) => Self::Removed,
            Some(false) => Self::NotRemoved,
        }
    }
}

/// Parameters of a written-question search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionQuery {
    pub legislature: u32,
    pub answered: AnswerStatus,
    pub removed: RemovalStatus,
    /// Page size (`limit`)
    pub size: u64,
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self {
            legislature: 14,
            answered: AnswerStatus::Any,
            removed: RemovalStatus::Any,
            size: 10,
        }
    }
}

impl QuestionQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn legislature(mut self, legislature: u32) -> Self {
        self.legislature = legislature;
        self
    }

    #[must_use]
    pub fn answered(mut self, answered: impl Into<AnswerStatus>) -> Self {
        self.answered = answered.into();
        self
    }

    #[must_use]
    pub fn removed(mut self, removed: impl Into<RemovalStatus>) -> Self {
        self.removed = removed.into();
        self
    }

    #[must_use]
    pub const fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Form fields, in endpoint order; `Any` statuses are left out.
    #[must_use]
    pub fn to_form(&self) -> Params {
        let mut form: Params = vec![
            ("limit", self.size.to_string()),
            ("legislature", self.legislature.to_string()),
        ];
        if let Some(replies) = self.answered.wire_value() {
            form.push(("replies[]", replies.to_string()));
        }
        if let Some(removed) = self.removed.wire_value() {
            form.push(("removed[]", removed.to_string()));
        }
        form.push(("ssTypeDocument[]", "qe".to_string()));
        form
    }
}

/// Client for the written-question search.
pub struct QuestionClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    search_path: String,
}

impl QuestionClient<HttpTransport> {
    /// Create a client for the public site with a default HTTP transport.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new(), QUESTION_BASE_URL, QUESTION_SEARCH_PATH)
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::with_transport(
            HttpTransport::from_config(config)?,
            config.question_base_url.clone(),
            config.question_search_path.clone(),
        ))
    }
}

impl Default for QuestionClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SearchTransport> QuestionClient<T> {
    /// Create a client over any transport.
    ///
    /// `search_path` and every follow-up link are resolved against `base_url`.
    pub fn with_transport(
        transport: T,
        base_url: impl Into<String>,
        search_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            search_path: search_path.into(),
        }
    }

    fn resolve(&self, link: &str) -> Result<Url, SearchError> {
        Ok(Url::parse(&self.base_url)?.join(link)?)
    }

    /// Fetch the first page of a search.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid, the request fails, the
    /// endpoint answers with a non-success status, or the page cannot be
    /// parsed.
    pub async fn get(&self, query: &QuestionQuery) -> Result<QuestionSearchResult, SearchError> {
        let url = self.resolve(&self.search_path)?;
        let form = query.to_form();

        let started = Instant::now();
        let response = self.transport.post_form(url.as_str(), &form).await?;
        tracing::debug!(
            ?form,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "fetched questions"
        );

        Ok(parse_question_search_result(&response.url, &response.body)?)
    }

    /// Number of questions matching `query`, fetched with a one-item page.
    ///
    /// # Errors
    /// Same as [`Self::get`].
    pub async fn total_count(&self, query: &QuestionQuery) -> Result<u64, SearchError> {
        Ok(self.get(&query.size(1)).await?.total_count)
    }

    /// Page through the results of `query` by following "next" links.
    ///
    /// The first page is fetched before this returns. At most one follow-up
    /// page is fetched per `size` step between 1 and the first page's total;
    /// iteration ends early as soon as a page carries no next link.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidPageSize`] for a page size of zero, or
    /// the error of the first fetch.
    pub async fn iter(&self, query: &QuestionQuery) -> Result<QuestionPages<'_, T>, SearchError> {
        if query.size == 0 {
            return Err(SearchError::InvalidPageSize);
        }

        let first = self.get(query).await?;
        let total_count = first.total_count;
        // One follow-up per offset in 1, 1 + size, ... below the total.
        let follow_ups = total_count.saturating_sub(1).div_ceil(query.size);
        progress::log_page("questions", query.size, &first);

        Ok(QuestionPages {
            client: self,
            size: query.size,
            total_count,
            follow_ups,
            fetched: query.size,
            next_url: first.next_url.clone(),
            first: Some(first),
            done: false,
        })
    }

    async fn follow(&self, next_url: &str) -> Result<QuestionSearchResult, SearchError> {
        let url = self.resolve(next_url)?;

        let started = Instant::now();
        let response = self.transport.get(url.as_str(), &[]).await?;
        tracing::debug!(
            %url,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "fetched next questions page"
        );

        Ok(parse_question_search_result(&response.url, &response.body)?)
    }
}

/// Lazy, single-pass sequence of written-question search pages.
///
/// Produced by [`QuestionClient::iter`]. Ends when the step budget derived
/// from the first page's total is spent, when a page has no next link, or
/// after a fetch error has been yielded.
pub struct QuestionPages<'a, T> {
    client: &'a QuestionClient<T>,
    size: u64,
    total_count: u64,
    follow_ups: u64,
    fetched: u64,
    /// Next link of the most recently yielded page.
    next_url: Option<String>,
    first: Option<QuestionSearchResult>,
    done: bool,
}

impl<'a, T: SearchTransport> QuestionPages<'a, T> {
    /// Total reported by the first page.
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Next page, or `None` once the sequence is over.
    pub async fn next(&mut self) -> Option<Result<QuestionSearchResult, SearchError>> {
        if let Some(first) = self.first.take() {
            return Some(Ok(first));
        }
        if self.done || self.follow_ups == 0 {
            return None;
        }
        self.follow_ups -= 1;

        let Some(next_url) = self.next_url.take() else {
            tracing::debug!(
                fetched = self.fetched.min(self.total_count),
                total = self.total_count,
                "no next questions page"
            );
            self.done = true;
            return None;
        };

        let page = self.client.follow(&next_url).await;
        match &page {
            Ok(page) => {
                self.fetched += self.size;
                self.next_url.clone_from(&page.next_url);
                progress::log_page("questions", self.fetched, page);
            }
            Err(_) => self.done = true,
        }
        Some(page)
    }

    /// Consume the pages as a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<QuestionSearchResult, SearchError>> + 'a
    where
        T: 'a,
    {
        futures::stream::unfold(self, |mut pages| async move {
            let page = pages.next().await?;
            Some((page, pages))
        })
    }
}
