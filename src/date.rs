//! Date parsing module
//!
//! Interprets the loosely formatted dates found in family records. Each
//! accepted pattern carries a [`Precision`], which later decides how exact an
//! age estimate can be.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// How much of a calendar date a pattern pins down
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    /// Only the year is known
    Year,
    /// Year and month are known
    Month,
    /// Year, month and day are known
    Day,
}

impl Precision {
    /// True when at least the month is known
    pub fn has_month(self) -> bool {
        self >= Precision::Month
    }

    /// True when the full date is known
    pub fn has_day(self) -> bool {
        self == Precision::Day
    }
}

/// Accepted date patterns
///
/// Patterns are tried in the order of [`DatePattern::ALL`] and the first one
/// that fits wins, so a bare year is only considered after every month and
/// day pattern has been rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePattern {
    /// `2024-11-20`
    IsoDate,
    /// `20.11.2024`
    DottedDate,
    /// `20/11/2024`
    SlashedDate,
    /// `2024-11`
    IsoMonth,
    /// `11.2024`
    DottedMonth,
    /// `11/2024`
    SlashedMonth,
    /// `2024`
    Year,
}

impl DatePattern {
    /// All patterns in matching order
    pub const ALL: [DatePattern; 7] = [
        DatePattern::IsoDate,
        DatePattern::DottedDate,
        DatePattern::SlashedDate,
        DatePattern::IsoMonth,
        DatePattern::DottedMonth,
        DatePattern::SlashedMonth,
        DatePattern::Year,
    ];

    /// strftime-style token describing the pattern
    pub fn format(self) -> &'static str {
        match self {
            DatePattern::IsoDate => "%Y-%m-%d",
            DatePattern::DottedDate => "%d.%m.%Y",
            DatePattern::SlashedDate => "%d/%m/%Y",
            DatePattern::IsoMonth => "%Y-%m",
            DatePattern::DottedMonth => "%m.%Y",
            DatePattern::SlashedMonth => "%m/%Y",
            DatePattern::Year => "%Y",
        }
    }

    /// Granularity a match of this pattern carries
    pub fn precision(self) -> Precision {
        match self {
            DatePattern::IsoDate | DatePattern::DottedDate | DatePattern::SlashedDate => {
                Precision::Day
            }
            DatePattern::IsoMonth | DatePattern::DottedMonth | DatePattern::SlashedMonth => {
                Precision::Month
            }
            DatePattern::Year => Precision::Year,
        }
    }

    /// Try to read `input` with this pattern alone
    ///
    /// Components the pattern does not carry default to 1, so `"1971"`
    /// becomes 1971-01-01 and `"05.1971"` becomes 1971-05-01.
    fn try_parse(self, input: &str) -> Option<NaiveDate> {
        // chrono skips whitespace, accepts signs and reads years of one to
        // four digits; record years are always exactly four digits.
        let year = self.year_field(input);
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !input.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let date = match self {
            DatePattern::IsoDate | DatePattern::DottedDate | DatePattern::SlashedDate => {
                NaiveDate::parse_from_str(input, self.format()).ok()
            }
            DatePattern::IsoMonth => {
                NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d").ok()
            }
            DatePattern::DottedMonth => {
                NaiveDate::parse_from_str(&format!("01.{}", input), "%d.%m.%Y").ok()
            }
            DatePattern::SlashedMonth => {
                NaiveDate::parse_from_str(&format!("01/{}", input), "%d/%m/%Y").ok()
            }
            DatePattern::Year => {
                NaiveDate::parse_from_str(&format!("{}-01-01", input), "%Y-%m-%d").ok()
            }
        }?;

        // there is no year 0 in the records' calendar
        (date.year() >= 1).then_some(date)
    }

    /// The part of `input` this pattern would read as the year
    fn year_field(self, input: &str) -> &str {
        let last = |sep: char| input.rsplit(sep).next().unwrap_or(input);
        match self {
            DatePattern::IsoDate | DatePattern::IsoMonth => {
                input.split('-').next().unwrap_or(input)
            }
            DatePattern::DottedDate | DatePattern::DottedMonth => last('.'),
            DatePattern::SlashedDate | DatePattern::SlashedMonth => last('/'),
            DatePattern::Year => input,
        }
    }
}

/// A date read from a record, together with the pattern that matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub pattern: DatePattern,
}

impl ParsedDate {
    /// Wrap the current day as a full-precision date
    pub fn today(date: NaiveDate) -> Self {
        Self {
            date,
            pattern: DatePattern::IsoDate,
        }
    }

    /// Granularity of this date
    pub fn precision(&self) -> Precision {
        self.pattern.precision()
    }
}

/// Parse a record date string
///
/// Supported formats, tried in this order:
/// - `"2024-11-20"`, `"20.11.2024"`, `"20/11/2024"` → day precision
/// - `"2024-11"`, `"11.2024"`, `"11/2024"` → month precision
/// - `"2024"` → year precision
///
/// Single-digit days and months are accepted (`"3/3/2100"`); the year is
/// always four digits.
pub fn parse_date(input: &str) -> Result<ParsedDate> {
    for pattern in DatePattern::ALL {
        match pattern.try_parse(input) {
            Some(date) => {
                debug!(input, format = pattern.format(), %date, "parsed date");
                return Ok(ParsedDate { date, pattern });
            }
            None => trace!(input, format = pattern.format(), "pattern rejected"),
        }
    }

    Err(Error::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_every_pattern() {
        let test_cases = vec![
            ("2024-11-20", DatePattern::IsoDate, ymd(2024, 11, 20)),
            ("20.11.2024", DatePattern::DottedDate, ymd(2024, 11, 20)),
            ("20/11/2024", DatePattern::SlashedDate, ymd(2024, 11, 20)),
            ("2024-11", DatePattern::IsoMonth, ymd(2024, 11, 1)),
            ("11.2024", DatePattern::DottedMonth, ymd(2024, 11, 1)),
            ("11/2024", DatePattern::SlashedMonth, ymd(2024, 11, 1)),
            ("2024", DatePattern::Year, ymd(2024, 1, 1)),
        ];

        for (input, expected_pattern, expected_date) in test_cases {
            let parsed = parse_date(input).unwrap();
            assert_eq!(parsed.pattern, expected_pattern, "pattern for {}", input);
            assert_eq!(parsed.date, expected_date, "date for {}", input);
        }
    }

    #[test]
    fn test_precision_of_patterns() {
        assert_eq!(parse_date("1884-06-19").unwrap().precision(), Precision::Day);
        assert_eq!(parse_date("06.1884").unwrap().precision(), Precision::Month);
        assert_eq!(parse_date("1884").unwrap().precision(), Precision::Year);
    }

    #[test]
    fn test_precision_ordering() {
        assert!(Precision::Day.has_month());
        assert!(Precision::Month.has_month());
        assert!(!Precision::Year.has_month());
        assert!(Precision::Day.has_day());
        assert!(!Precision::Month.has_day());
    }

    #[test]
    fn test_single_digit_components() {
        let parsed = parse_date("3/03/2100").unwrap();
        assert_eq!(parsed.pattern, DatePattern::SlashedDate);
        assert_eq!(parsed.date, ymd(2100, 3, 3));

        let parsed = parse_date("5.1971").unwrap();
        assert_eq!(parsed.pattern, DatePattern::DottedMonth);
        assert_eq!(parsed.date.month(), 5);
    }

    #[test]
    fn test_order_resolves_ambiguity() {
        // "12.2000" cannot be a dotted day (month 20), so it lands on month.year
        let parsed = parse_date("12.2000").unwrap();
        assert_eq!(parsed.pattern, DatePattern::DottedMonth);

        // a full ISO date never falls through to the shorter ISO month
        let parsed = parse_date("1971-05-01").unwrap();
        assert_eq!(parsed.pattern, DatePattern::IsoDate);

        let parsed = parse_date("1971-05").unwrap();
        assert_eq!(parsed.pattern, DatePattern::IsoMonth);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_date("not-a-date"), Err(Error::InvalidDate(_))));
        assert!(parse_date("").is_err());
        assert!(parse_date("2024-13-01").is_err()); // Invalid month, no fallback fits
        assert!(parse_date("31.02.2024").is_err()); // No 31st of February
        assert!(parse_date(" 2024").is_err());
        assert!(parse_date("2024 ").is_err());
        assert!(parse_date("-2024").is_err());
    }

    #[test]
    fn test_year_needs_four_digits() {
        for input in ["7", "500", "1-1", "5.500", "3/3/21", "12024", "0000", "00.0000"] {
            assert!(
                matches!(parse_date(input), Err(Error::InvalidDate(_))),
                "{} should not parse",
                input
            );
        }
        assert_eq!(parse_date("0001").unwrap().date, ymd(1, 1, 1));
        assert_eq!(parse_date("0500").unwrap().pattern, DatePattern::Year);
    }

    #[test]
    fn test_invalid_date_message_names_input() {
        let err = parse_date("circa 1900").unwrap_err();
        assert!(err.to_string().contains("circa 1900"));
    }

    #[test]
    fn test_today_is_day_precision() {
        let today = ParsedDate::today(ymd(2026, 1, 7));
        assert_eq!(today.precision(), Precision::Day);
        assert_eq!(today.date, ymd(2026, 1, 7));
    }

    #[test]
    fn test_format_tokens() {
        let tokens: Vec<_> = DatePattern::ALL.iter().map(|p| p.format()).collect();
        assert_eq!(
            tokens,
            vec!["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y-%m", "%m.%Y", "%m/%Y", "%Y"]
        );
    }
}
