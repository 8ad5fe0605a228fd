//! Fetch progress reporting for the page iterators.

use an_parse::SearchPage;

/// Share of `total` covered by `fetched`, in percent.
///
/// `None` when the server reports no results at all: progress is not
/// applicable then. `fetched` is capped at `total` since the last page is
/// usually short.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent(fetched: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(fetched.min(total) as f64 / total as f64 * 100.0)
}

/// Log how far a pagination has gone after receiving `page`.
pub fn log_page(kind: &'static str, fetched: u64, page: &impl SearchPage) {
    let total = page.total_count();
    match percent(fetched, total) {
        Some(pct) => tracing::debug!(
            kind,
            fetched = fetched.min(total),
            total,
            "{kind} fetched: {}/{total} ({pct:.1}%)",
            fetched.min(total)
        ),
        None => tracing::debug!(kind, "{kind} search returned no results"),
    }
}
