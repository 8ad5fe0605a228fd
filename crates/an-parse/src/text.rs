//! Small text helpers shared by both parsers.

use chrono::NaiveDate;
use scraper::ElementRef;

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Collapse all runs of whitespace (including non-breaking spaces) to one space.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, text nodes joined by a space and normalized.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<Vec<_>>().join(" "))
}

/// Parse a date written either `DD/MM/YYYY` or `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Every date token found in free text, in order of appearance.
pub fn dates_in(s: &str) -> Vec<NaiveDate> {
    s.split(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .filter_map(parse_date)
        .collect()
}

/// Digits of a count such as `"1 234 résultats"`, with separators dropped.
///
/// Only the first run of digits (allowing spaces and dots inside it) counts.
pub fn leading_count(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || c.is_whitespace() || *c == '.')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ws_handles_nbsp() {
        assert_eq!(normalize_ws("  M.\u{a0}Jean \n Dupont "), "M. Jean Dupont");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2014, 7, 1);
        assert_eq!(parse_date("01/07/2014"), expected);
        assert_eq!(parse_date("2014-07-01"), expected);
        assert_eq!(parse_date("1er juillet"), None);
    }

    #[test]
    fn test_dates_in_free_text() {
        let dates = dates_in("Question publiée au JO le : 01/07/2014 Réponse publiée au JO le : 02/09/2014");
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2014, 7, 1).unwrap(),
                NaiveDate::from_ymd_opt(2014, 9, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn leading_count_cases() {
        let cases = [
            ("1 234 résultats", Some(1234)),
            ("12\u{a0}345 résultats", Some(12345)),
            ("1.234 résultats", Some(1234)),
            ("Résultats : 42", Some(42)),
            ("Aucun résultat", None),
            ("", None),
        ];

        for (input, expected) in cases {
            assert_eq!(leading_count(input), expected, "case {input:?}");
        }
    }
}
