//! Year extraction from free-text dates

use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;

/// Four-digit years 1000 through 2029, on word boundaries.
///
/// Anything outside that window is treated as ordinary numeric text.
static DATE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(1[0-9]{3}|20[0-2][0-9])\b").expect("date year pattern is valid")
});

/// Resolve a year from a normalized field or, failing that, a date string.
///
/// A normalized year is returned unchanged whenever it is present. Otherwise
/// the first year-like token in `date` is used.
///
/// # Examples
///
/// ```
/// use kinship_domain::extract_year;
///
/// assert_eq!(extract_year(Some("abt. 1842"), None), Some(1842));
/// assert_eq!(extract_year(Some("abt. 1842"), Some(1843)), Some(1843));
/// assert_eq!(extract_year(Some("2031-01-01"), None), None);
/// ```
pub fn extract_year(date: Option<&str>, normalized: Option<i32>) -> Option<i32> {
    if normalized.is_some() {
        return normalized;
    }
    let date = date?;
    DATE_YEAR
        .captures(date)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Century a year falls in, `ceil(year / 100)`.
///
/// 1800 is in the 18th century, 1801 in the 19th.
pub fn century_of(year: i32) -> i32 {
    let floor = year.div_euclid(100);
    if year.rem_euclid(100) == 0 {
        floor
    } else {
        floor + 1
    }
}

/// Current calendar year from the local wall clock
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_first_year_in_text() {
        assert_eq!(extract_year(Some("12 Mar 1856"), None), Some(1856));
        assert_eq!(extract_year(Some("between 1790 and 1795"), None), Some(1790));
        assert_eq!(extract_year(Some("2029"), None), Some(2029));
        assert_eq!(extract_year(Some("1000"), None), Some(1000));
    }

    #[test]
    fn test_rejects_years_outside_window() {
        assert_eq!(extract_year(Some("2030"), None), None);
        assert_eq!(extract_year(Some("999"), None), None);
        assert_eq!(extract_year(Some("lot 31856"), None), None);
        assert_eq!(extract_year(Some("unknown"), None), None);
        assert_eq!(extract_year(Some(""), None), None);
        assert_eq!(extract_year(None, None), None);
    }

    #[test]
    fn test_normalized_year_wins() {
        assert_eq!(extract_year(Some("1856"), Some(1857)), Some(1857));
        assert_eq!(extract_year(None, Some(-44)), Some(-44));
    }

    #[test]
    fn test_century_of() {
        assert_eq!(century_of(1801), 19);
        assert_eq!(century_of(1850), 19);
        assert_eq!(century_of(1900), 19);
        assert_eq!(century_of(1901), 20);
        assert_eq!(century_of(2024), 21);
        assert_eq!(century_of(-50), 0);
        assert_eq!(century_of(i32::MAX), 21_474_837);
        assert_eq!(century_of(i32::MIN), -21_474_836);
    }

    proptest! {
        /// Property: a normalized year is returned regardless of the date text
        #[test]
        fn test_normalized_year_ignores_text(year in 1i32..3000, text in ".*") {
            prop_assert_eq!(extract_year(Some(&text), Some(year)), Some(year));
        }

        /// Property: extracted years always fall in the accepted window
        #[test]
        fn test_extracted_year_in_window(text in "[a-z0-9 ,./-]{0,40}") {
            if let Some(year) = extract_year(Some(&text), None) {
                prop_assert!((1000..=2029).contains(&year));
            }
        }
    }
}
