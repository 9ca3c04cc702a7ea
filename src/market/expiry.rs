//! Expiry timestamp extraction from fast-market question text
//!
//! Fast markets carry their settlement time only inside the human-readable
//! question, e.g. "Bitcoin Up or Down - February 15, 5:30AM-5:35AM ET".
//! The end-of-window time is extracted and converted to UTC. Polymarket
//! quotes these in US Eastern at a fixed UTC-5 offset with no daylight
//! saving adjustment, so conversion is a flat +5 hours.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Matches "Month Day, ... - H:MM(AM|PM) ET" and captures the date and the
/// window end time
fn expiry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\w+ \d+),.*?-\s*(\d{1,2}:\d{2}(?:AM|PM))\s*ET").expect("valid expiry regex")
    })
}

/// Parse the market end time out of a fast-market question.
///
/// The question omits the year, so the caller supplies one (the current UTC
/// year in practice). Returns None when the question does not contain a
/// recognizable window; such markets stay listed but are never selected.
pub fn parse_expiry(question: &str, year: i32) -> Option<DateTime<Utc>> {
    let caps = expiry_pattern().captures(question)?;
    let date_str = caps.get(1)?.as_str();
    let time_str = caps.get(2)?.as_str();

    let dt_str = format!("{} {} {}", date_str, year, time_str);
    let naive = NaiveDateTime::parse_from_str(&dt_str, "%B %d %Y %I:%M%p").ok()?;

    // ET as fixed UTC-5: add 5 hours to get UTC
    Some(Utc.from_utc_datetime(&naive) + Duration::hours(5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_expiry_reference_vector() {
        let question = "Bitcoin Up or Down - February 15, 5:30AM-5:35AM ET";
        let end = parse_expiry(question, 2025).unwrap();
        let expected = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2025, 2, 15)
                .unwrap()
                .and_hms_opt(10, 35, 0)
                .unwrap(),
        );
        assert_eq!(end, expected);
    }

    #[test]
    fn test_parse_expiry_pm() {
        let question = "Ethereum Up or Down - March 3, 11:45PM-11:50PM ET";
        let end = parse_expiry(question, 2025).unwrap();
        // 11:50PM ET + 5h rolls over to 04:50 UTC next day
        let expected = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2025, 3, 4)
                .unwrap()
                .and_hms_opt(4, 50, 0)
                .unwrap(),
        );
        assert_eq!(end, expected);
    }

    #[test]
    fn test_parse_expiry_no_window() {
        assert!(parse_expiry("Will BTC close above $100k this year?", 2025).is_none());
    }

    #[test]
    fn test_parse_expiry_missing_et_suffix() {
        assert!(parse_expiry("Bitcoin Up or Down - February 15, 5:30AM-5:35AM", 2025).is_none());
    }

    #[test]
    fn test_parse_expiry_bad_month() {
        assert!(parse_expiry("Bitcoin Up or Down - Smarch 15, 5:30AM-5:35AM ET", 2025).is_none());
    }

    #[test]
    fn test_parse_expiry_uses_end_of_window() {
        // Captures the end time after the dash, not the start time
        let question = "Solana Up or Down - July 1, 9:00AM-9:15AM ET";
        let end = parse_expiry(question, 2026).unwrap();
        let expected = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2026, 7, 1)
                .unwrap()
                .and_hms_opt(14, 15, 0)
                .unwrap(),
        );
        assert_eq!(end, expected);
    }
}
