//! Written-question search result pages.
//!
//! The question search renders HTML. A result page looks like:
//!
//! ```html
//! <p class="nombre-resultats">1 234 résultats</p>
//! <table class="resultats">
//!   <tbody>
//!     <tr>
//!       <td class="numero"><a href="/q14/14-1234QE.htm">14-1234QE</a></td>
//!       <td class="auteur">M. Jean Dupont</td>
//!       <td class="rubrique">agriculture</td>
//!       <td class="dates">Question publiée au JO le : 01/07/2014<br>
//!           Réponse publiée au JO le : 02/09/2014</td>
//!     </tr>
//!   </tbody>
//! </table>
//! <ul class="pagination"><li class="next"><a href="recherche/resultats_questions?page=2">Suivant</a></li></ul>
//! ```

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{text, ParseError, SearchPage};

const COUNT_SELECTOR: &str = ".nombre-resultats";
const ROW_SELECTOR: &str = "table.resultats tbody tr";
const NUMBER_SELECTOR: &str = "td.numero";
const LINK_SELECTOR: &str = "a[href]";
const AUTHOR_SELECTOR: &str = "td.auteur";
const TOPIC_SELECTOR: &str = "td.rubrique";
const DATES_SELECTOR: &str = "td.dates";
const NEXT_SELECTOR: &str = ".pagination li.next:not(.disabled) a[href]";

/// One written question from a search page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSummary {
    /// Absolute URL of the question page.
    pub url: String,
    /// Legislature number, from the `14-1234QE` style label.
    pub legislature: Option<u32>,
    /// Question label as displayed (e.g. `14-1234QE`).
    pub num: String,
    pub author: String,
    /// Topic heading ("rubrique").
    pub rubrique: String,
    /// Date the question was published in the Journal officiel.
    pub published_on: Option<NaiveDate>,
    /// Date the answer was published, if any.
    pub answered_on: Option<NaiveDate>,
}

impl QuestionSummary {
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.answered_on.is_some()
    }
}

/// A page of written-question search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSearchResult {
    /// URL the page was fetched from.
    pub url: String,
    pub total_count: u64,
    pub results: Vec<QuestionSummary>,
    /// Relative link to the next page, verbatim from the pagination block.
    pub next_url: Option<String>,
}

impl SearchPage for QuestionSearchResult {
    type Item = QuestionSummary;

    fn total_count(&self) -> u64 {
        self.total_count
    }

    fn results(&self) -> &[QuestionSummary] {
        &self.results
    }

    fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }
}

struct Selectors {
    count: Selector,
    row: Selector,
    number: Selector,
    link: Selector,
    author: Selector,
    topic: Selector,
    dates: Selector,
    next: Selector,
}

impl Selectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            count: selector(COUNT_SELECTOR)?,
            row: selector(ROW_SELECTOR)?,
            number: selector(NUMBER_SELECTOR)?,
            link: selector(LINK_SELECTOR)?,
            author: selector(AUTHOR_SELECTOR)?,
            topic: selector(TOPIC_SELECTOR)?,
            dates: selector(DATES_SELECTOR)?,
            next: selector(NEXT_SELECTOR)?,
        })
    }
}

fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css,
        message: format!("{e:?}"),
    })
}

/// Parse a written-question search page.
///
/// `url` is the final URL of the response; question links are resolved
/// against it. The body is decoded as UTF-8, replacing invalid sequences.
///
/// # Errors
/// Returns [`ParseError::Url`] if `url` is not absolute or a question link
/// cannot be resolved, and [`ParseError::Missing`] or
/// [`ParseError::InvalidCount`] if the page lists questions without a
/// readable result count.
pub fn parse_question_search_result(
    url: &str,
    body: &[u8],
) -> Result<QuestionSearchResult, ParseError> {
    let base = Url::parse(url)?;
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);
    let selectors = Selectors::new()?;

    let results = document
        .select(&selectors.row)
        .filter_map(|row| parse_row(row, &selectors, &base).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let total_count = match document.select(&selectors.count).next() {
        Some(element) => {
            let label = text::element_text(element);
            match text::leading_count(&label) {
                Some(count) => count,
                None if results.is_empty() => 0,
                None => return Err(ParseError::InvalidCount(label)),
            }
        }
        None if results.is_empty() => 0,
        None => return Err(ParseError::Missing("result count")),
    };

    let next_url = document
        .select(&selectors.next)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(String::from);

    Ok(QuestionSearchResult {
        url: url.to_string(),
        total_count,
        results,
        next_url,
    })
}

/// Rows without a number cell are layout rows and are skipped.
fn parse_row(
    row: ElementRef<'_>,
    selectors: &Selectors,
    base: &Url,
) -> Result<Option<QuestionSummary>, ParseError> {
    let Some(number_cell) = row.select(&selectors.number).next() else {
        return Ok(None);
    };

    let num = text::element_text(number_cell);
    let url = match number_cell
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        Some(href) => base.join(href.trim())?.to_string(),
        None => String::new(),
    };

    let cell_text = |sel: &Selector| {
        row.select(sel)
            .next()
            .map(text::element_text)
            .unwrap_or_default()
    };

    let mut dates = text::dates_in(&cell_text(&selectors.dates)).into_iter();

    Ok(Some(QuestionSummary {
        url,
        legislature: legislature_of(&num),
        author: cell_text(&selectors.author),
        rubrique: cell_text(&selectors.topic),
        published_on: dates.next(),
        answered_on: dates.next(),
        num,
    }))
}

/// `14-1234QE` → `Some(14)`
fn legislature_of(label: &str) -> Option<u32> {
    label.split_once('-')?.0.trim().parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PAGE_URL: &str = "http://www2.assemblee-nationale.fr/recherche/resultats_questions";

    fn row(num: &str, author: &str, dates: &str) -> String {
        format!(
            r#"<tr>
                 <td class="numero"><a href="/q14/{num}.htm">{num}</a></td>
                 <td class="auteur">{author}</td>
                 <td class="rubrique">agriculture</td>
                 <td class="dates">{dates}</td>
               </tr>"#
        )
    }

    fn page(count: &str, rows: &[String], pagination: &str) -> String {
        format!(
            r#"<html><body>
                 <p class="nombre-resultats">{count}</p>
                 <table class="resultats"><thead><tr><th>N°</th></tr></thead>
                   <tbody>{}</tbody>
                 </table>
                 {pagination}
               </body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_parse_rows_count_and_next_link() {
        let html = page(
            "1&nbsp;234 résultats",
            &[
                row(
                    "14-1234QE",
                    "M. Jean Dupont",
                    "Question publiée au JO le : 01/07/2014<br>Réponse publiée au JO le : 02/09/2014",
                ),
                row("14-1235QE", "Mme Anne Martin", "Question publiée au JO le : 03/07/2014"),
            ],
            r#"<ul class="pagination"><li class="previous disabled"><a href="">Précédent</a></li>
               <li class="next"><a href="recherche/resultats_questions?page=2">Suivant</a></li></ul>"#,
        );

        let result = parse_question_search_result(PAGE_URL, html.as_bytes()).unwrap();
        assert_eq!(result.total_count, 1234);
        assert_eq!(
            result.next_url.as_deref(),
            Some("recherche/resultats_questions?page=2")
        );
        assert_eq!(result.results.len(), 2);

        let first = &result.results[0];
        assert_eq!(first.num, "14-1234QE");
        assert_eq!(first.legislature, Some(14));
        assert_eq!(first.url, "http://www2.assemblee-nationale.fr/q14/14-1234QE.htm");
        assert_eq!(first.author, "M. Jean Dupont");
        assert_eq!(first.rubrique, "agriculture");
        assert_eq!(first.published_on, NaiveDate::from_ymd_opt(2014, 7, 1));
        assert_eq!(first.answered_on, NaiveDate::from_ymd_opt(2014, 9, 2));
        assert!(first.is_answered());

        let second = &result.results[1];
        assert_eq!(second.author, "Mme Anne Martin");
        assert_eq!(second.answered_on, None);
        assert!(!second.is_answered());
    }

    #[test]
    fn test_last_page_has_no_next_url() {
        let html = page(
            "2 résultats",
            &[row("14-1QE", "M. A", "01/07/2014")],
            r##"<ul class="pagination"><li class="next disabled"><a href="#">Suivant</a></li></ul>"##,
        );
        let result = parse_question_search_result(PAGE_URL, html.as_bytes()).unwrap();
        assert_eq!(result.next_url, None);
        assert_eq!(SearchPage::next_url(&result), None);
    }

    #[test]
    fn test_empty_page_without_count_has_zero_total() {
        let html = "<html><body><p>Aucun résultat ne correspond à votre recherche.</p></body></html>";
        let result = parse_question_search_result(PAGE_URL, html.as_bytes()).unwrap();
        assert_eq!(result.total_count, 0);
        assert!(result.results.is_empty());
        assert_eq!(result.next_url, None);
    }

    #[test]
    fn test_rows_without_count_is_an_error() {
        let html = format!(
            r#"<table class="resultats"><tbody>{}</tbody></table>"#,
            row("14-1QE", "M. A", "")
        );
        let result = parse_question_search_result(PAGE_URL, html.as_bytes());
        assert!(matches!(result, Err(ParseError::Missing(_))));
    }

    #[test]
    fn test_unreadable_count_is_an_error() {
        let html = page("beaucoup", &[row("14-1QE", "M. A", "")], "");
        let result = parse_question_search_result(PAGE_URL, html.as_bytes());
        assert!(matches!(result, Err(ParseError::InvalidCount(label)) if label == "beaucoup"));
    }

    #[test]
    fn test_relative_page_url_is_an_error() {
        let result = parse_question_search_result("resultats", b"<html></html>");
        assert!(matches!(result, Err(ParseError::Url(_))));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut body = page("1 résultat", &[row("14-9QE", "M. B", "")], "").into_bytes();
        body.extend_from_slice(&[0xff, 0xfe]);
        let result = parse_question_search_result(PAGE_URL, &body).unwrap();
        assert_eq!(result.results[0].num, "14-9QE");
    }

    proptest! {
        #[test]
        fn parsing_arbitrary_bytes_never_panics(body in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = parse_question_search_result(PAGE_URL, &body);
        }
    }
}
