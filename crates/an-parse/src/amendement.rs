//! Amendment search summaries.
//!
//! The amendment endpoint answers with a compact JSON document: a header
//! (`infoGenerales`) giving the result count, the offset of the page and a
//! `|`-separated column schema, and a `data_table` of rows encoded with the
//! same separator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_number_from_string;
use url::Url;

use crate::{text, ParseError, SearchPage};

const COLUMN_SEPARATOR: char = '|';

/// One row of an amendment search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmendementSummary {
    pub id: String,
    /// Number of the text the amendment applies to.
    pub num_init: String,
    pub titre_dossier_legislatif: String,
    /// Absolute URL of the legislative dossier.
    pub url_dossier_legislatif: String,
    /// Body the amendment was tabled in (e.g. "Séance publique", a committee name).
    pub instance: String,
    /// Amendment number as displayed, which is also its position in the text order.
    pub num_amend: String,
    /// Absolute URL of the amendment page.
    pub url_amend: String,
    pub designation_article: String,
    pub designation_alinea: String,
    pub date_depot: Option<NaiveDate>,
    pub signataires: String,
    /// Outcome ("Adopté", "Rejeté", ...), empty while pending.
    pub sort: String,
    /// Legislature number, taken from the amendment URL when present.
    pub legislature: Option<u32>,
}

/// A page of amendment summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmendementSearchResult {
    /// URL the page was fetched from.
    pub url: String,
    pub total_count: u64,
    /// 1-based offset of the first row, as reported by the server.
    pub start: u64,
    /// Number of rows the server says it returned.
    pub size: u64,
    pub results: Vec<AmendementSummary>,
}

impl SearchPage for AmendementSearchResult {
    type Item = AmendementSummary;

    fn total_count(&self) -> u64 {
        self.total_count
    }

    fn results(&self) -> &[AmendementSummary] {
        &self.results
    }
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    #[serde(rename = "infoGenerales")]
    info: RawInfo,
    #[serde(default)]
    data_table: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    nb_resultats: u64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    debut: u64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    nb_docs: u64,
    description_schema: String,
}

/// Parse the JSON summary returned by the amendment search.
///
/// `url` is the final URL of the response; relative links in the rows are
/// resolved against it.
///
/// # Errors
/// Returns [`ParseError::Json`] if the document lacks the summary header,
/// [`ParseError::Url`] if `url` is not an absolute URL, and
/// [`ParseError::Missing`] if the schema has no `numAmend` column.
pub fn parse_amendements_summary(
    url: &str,
    json: &serde_json::Value,
) -> Result<AmendementSearchResult, ParseError> {
    let raw = RawSummary::deserialize(json)?;
    let base = Url::parse(url)?;

    let schema: Vec<&str> = raw
        .info
        .description_schema
        .split(COLUMN_SEPARATOR)
        .map(str::trim)
        .collect();
    if !schema.contains(&"numAmend") {
        return Err(ParseError::Missing("numAmend column"));
    }

    let results = raw
        .data_table
        .iter()
        .map(|row| parse_row(&schema, row, &base))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AmendementSearchResult {
        url: url.to_string(),
        total_count: raw.info.nb_resultats,
        start: raw.info.debut,
        size: raw.info.nb_docs,
        results,
    })
}

fn parse_row(schema: &[&str], row: &str, base: &Url) -> Result<AmendementSummary, ParseError> {
    let mut summary = AmendementSummary::default();

    for (column, value) in schema.iter().zip(row.split(COLUMN_SEPARATOR)) {
        let value = value.trim();
        match *column {
            "id" => summary.id = value.to_string(),
            "numInit" => summary.num_init = value.to_string(),
            "titreDossierLegislatif" => summary.titre_dossier_legislatif = value.to_string(),
            "urlDossierLegislatif" => summary.url_dossier_legislatif = resolve(base, value)?,
            "instance" => summary.instance = value.to_string(),
            "numAmend" => summary.num_amend = value.to_string(),
            "urlAmend" => summary.url_amend = resolve(base, value)?,
            "designationArticle" => summary.designation_article = value.to_string(),
            "designationAlinea" => summary.designation_alinea = value.to_string(),
            "dateDepot" => summary.date_depot = text::parse_date(value),
            "signataires" => summary.signataires = text::normalize_ws(value),
            "sort" => summary.sort = value.to_string(),
            other => tracing::trace!(column = other, "ignoring unknown amendement column"),
        }
    }

    summary.legislature = legislature_of(&summary.url_amend);
    Ok(summary)
}

fn resolve(base: &Url, href: &str) -> Result<String, ParseError> {
    if href.is_empty() {
        return Ok(String::new());
    }
    Ok(base.join(href)?.to_string())
}

/// `http://www.assemblee-nationale.fr/14/amendements/...` → `Some(14)`
fn legislature_of(url: &str) -> Option<u32> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?.next()?.parse().ok()
}
