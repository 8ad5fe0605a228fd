//! Amendment search client.

use std::time::Instant;

use an_parse::{parse_amendements_summary, AmendementSearchResult};
use futures::Stream;

use super::filters::{AmendementFilters, DEFAULT_ROWS};
use super::progress;
use super::transport::{HttpTransport, SearchTransport};
use super::SearchError;
use crate::config::SearchConfig;

/// Default amendment search endpoint.
pub const AMENDEMENT_SEARCH_URL: &str =
    "http://www2.assemblee-nationale.fr/recherche/query_amendements";

/// Client for the amendment search endpoint.
///
/// Holds an immutable set of default filters; every call merges the
/// caller's filters over them.
pub struct AmendementClient<T = HttpTransport> {
    transport: T,
    search_url: String,
    defaults: AmendementFilters,
}

impl AmendementClient<HttpTransport> {
    /// Create a client for the public endpoint with a default HTTP transport.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new(), AMENDEMENT_SEARCH_URL)
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::with_transport(
            HttpTransport::from_config(config)?,
            config.amendement_url.clone(),
        ))
    }
}

impl Default for AmendementClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SearchTransport> AmendementClient<T> {
    /// Create a client over any transport (e.g. a mock in tests).
    pub fn with_transport(transport: T, search_url: impl Into<String>) -> Self {
        Self {
            transport,
            search_url: search_url.into(),
            defaults: AmendementFilters::client_defaults(),
        }
    }

    /// Replace the default filters the caller's filters are merged over.
    #[must_use]
    pub fn with_defaults(mut self, defaults: AmendementFilters) -> Self {
        self.defaults = defaults;
        self
    }

    pub const fn defaults(&self) -> &AmendementFilters {
        &self.defaults
    }

    /// Fetch a single page.
    ///
    /// `rows` sets the page size and `start` the 1-based offset; both are
    /// sent exactly as given, `rows` falling back to the client default.
    ///
    /// # Errors
    /// Returns an error if the request fails, the endpoint answers with a
    /// non-success status, or the body is not a valid amendment summary.
    pub async fn get(
        &self,
        filters: &AmendementFilters,
    ) -> Result<AmendementSearchResult, SearchError> {
        let params = filters.merged_over(&self.defaults).to_params();

        let started = Instant::now();
        let response = self.transport.get(&self.search_url, &params).await?;
        tracing::debug!(
            ?params,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "fetched amendements"
        );

        let json: serde_json::Value = serde_json::from_slice(&response.body)?;
        Ok(parse_amendements_summary(&response.url, &json)?)
    }

    /// Number of amendments matching `filters`, fetched with a one-row page.
    ///
    /// # Errors
    /// Same as [`Self::get`].
    pub async fn total_count(&self, filters: &AmendementFilters) -> Result<u64, SearchError> {
        let page = self.get(&filters.clone().rows(1)).await?;
        Ok(page.total_count)
    }

    /// Page through every result matching `filters`.
    ///
    /// The first page is fetched before this returns; the following pages
    /// are fetched one at a time as [`AmendementPages::next`] is called, with
    /// `start` advancing by the page size. The number of pages is fixed by
    /// the total reported on the first page.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidPageSize`] for a page size of zero, or
    /// the error of the first fetch.
    pub async fn iterator(
        &self,
        filters: &AmendementFilters,
    ) -> Result<AmendementPages<'_, T>, SearchError> {
        let rows = filters
            .rows
            .or(self.defaults.rows)
            .unwrap_or(DEFAULT_ROWS);
        if rows == 0 {
            return Err(SearchError::InvalidPageSize);
        }

        let filters = filters.clone().rows(rows);
        let first = self.get(&filters).await?;
        tracing::debug!(
            total = first.total_count,
            rows,
            "start to fetch amendements"
        );
        progress::log_page("amendements", rows, &first);

        Ok(AmendementPages {
            client: self,
            filters,
            rows,
            total_count: first.total_count,
            next_offset: rows,
            first: Some(first),
            done: false,
        })
    }

    /// Every `num_amend` matching `filters`, in fetch order across all pages.
    ///
    /// Pages are fetched through this client, so its endpoint, transport
    /// and default filters apply.
    ///
    /// # Errors
    /// Returns the first error met while paging.
    pub async fn get_order(&self, filters: &AmendementFilters) -> Result<Vec<String>, SearchError> {
        let mut pages = self.iterator(filters).await?;
        let mut order = Vec::new();
        while let Some(page) = pages.next().await {
            order.extend(page?.results.into_iter().map(|amendement| amendement.num_amend));
        }
        Ok(order)
    }
}

/// Lazy, single-pass sequence of amendment search pages.
///
/// Produced by [`AmendementClient::iterator`]. After a fetch error is
/// yielded the sequence ends.
pub struct AmendementPages<'a, T> {
    client: &'a AmendementClient<T>,
    filters: AmendementFilters,
    rows: u64,
    total_count: u64,
    /// 0-based offset of the next page to fetch.
    next_offset: u64,
    first: Option<AmendementSearchResult>,
    done: bool,
}

impl<'a, T: SearchTransport> AmendementPages<'a, T> {
    /// Total reported by the first page; bounds the iteration.
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    pub const fn page_size(&self) -> u64 {
        self.rows
    }

    /// Number of pages the whole iteration yields (the first page included).
    pub const fn page_count(&self) -> u64 {
        if self.total_count <= self.rows {
            1
        } else {
            self.total_count.div_ceil(self.rows)
        }
    }

    /// Next page, or `None` once every page has been yielded.
    pub async fn next(&mut self) -> Option<Result<AmendementSearchResult, SearchError>> {
        if let Some(first) = self.first.take() {
            return Some(Ok(first));
        }
        if self.done || self.next_offset >= self.total_count {
            return None;
        }

        let offset = self.next_offset;
        self.next_offset += self.rows;

        let filters = self.filters.clone().start(offset + 1);
        let page = self.client.get(&filters).await;
        match &page {
            Ok(page) => progress::log_page("amendements", offset + self.rows, page),
            Err(_) => self.done = true,
        }
        Some(page)
    }

    /// Consume the pages as a [`Stream`].
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<AmendementSearchResult, SearchError>> + 'a
    where
        T: 'a,
    {
        futures::stream::unfold(self, |mut pages| async move {
            let page = pages.next().await?;
            Some((page, pages))
        })
    }
}
