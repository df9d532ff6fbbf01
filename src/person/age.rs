//! Age estimation from record dates of mixed precision

use std::fmt;

use chrono::Datelike;
use tracing::debug;

use crate::date::ParsedDate;

/// Estimated age in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    /// Age resolved to a single value
    Exact(i64),
    /// Age is one of two consecutive values, `(low, high)`
    Range(i64, i64),
}

impl Age {
    fn uncertain(years: i64) -> Self {
        Age::Range(years - 1, years)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Exact(years) => write!(f, "{}", years),
            Age::Range(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

/// Estimate the age between two record dates
///
/// - both dates known to the day: `years + months/12 + days/365`, truncated.
///   This approximates calendar arithmetic rather than performing it.
/// - both known at least to the month: the month difference decides; an equal
///   month stays a range since the day is unknown.
/// - otherwise: a range of the two possible year counts.
pub fn estimate_age(start: &ParsedDate, end: &ParsedDate) -> Age {
    let years = i64::from(end.date.year() - start.date.year());
    let months = i64::from(end.date.month()) - i64::from(start.date.month());

    let (start_precision, end_precision) = (start.precision(), end.precision());

    let age = if start_precision.has_day() && end_precision.has_day() {
        let days = i64::from(end.date.day()) - i64::from(start.date.day());
        let approx = years as f64 + months as f64 / 12.0 + days as f64 / 365.0;
        Age::Exact(approx.trunc() as i64)
    } else if start_precision.has_month() && end_precision.has_month() {
        match months {
            m if m < 0 => Age::Exact(years - 1),
            m if m > 0 => Age::Exact(years),
            _ => Age::uncertain(years),
        }
    } else {
        Age::uncertain(years)
    };

    debug!(?start_precision, ?end_precision, %age, "estimated age");
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_date;
    use chrono::NaiveDate;

    fn age(start: &str, end: &str) -> Age {
        estimate_age(&parse_date(start).unwrap(), &parse_date(end).unwrap())
    }

    #[test]
    fn test_day_precision_both_sides() {
        assert_eq!(age("15.06.1950", "20/06/2000"), Age::Exact(50));
        assert_eq!(age("1884-06-19", "1952-09-17"), Age::Exact(68));
    }

    #[test]
    fn test_day_precision_near_birthday() {
        // one day before the 74th birthday
        assert_eq!(age("1950-06-15", "2024-06-14"), Age::Exact(73));
        // 74 - 1/12 + 27/365
        assert_eq!(age("1950-03-01", "2024-02-28"), Age::Exact(73));
        // 74 + 1/12 - 30/365
        assert_eq!(age("1950-01-31", "2024-02-01"), Age::Exact(74));
    }

    #[test]
    fn test_day_precision_truncates_toward_zero() {
        // -2/12 - 9/365 stays at 0 rather than flooring to -1
        assert_eq!(age("2000-05-10", "2000-03-01"), Age::Exact(0));
    }

    #[test]
    fn test_month_precision() {
        assert_eq!(age("1950-06", "05.2000"), Age::Exact(49));
        assert_eq!(age("1950-06", "07/2000"), Age::Exact(50));
        assert_eq!(age("06/1950", "2000-06"), Age::Range(49, 50));
    }

    #[test]
    fn test_month_precision_mixed_with_day() {
        assert_eq!(age("15.06.1950", "06.2000"), Age::Range(49, 50));
        assert_eq!(age("1950-06", "2000-08-01"), Age::Exact(50));
    }

    #[test]
    fn test_year_precision_gives_range() {
        assert_eq!(age("1971", "1981"), Age::Range(9, 10));
        assert_eq!(age("2000", "3/03/2100"), Age::Range(99, 100));
        assert_eq!(age("1950-06", "2000"), Age::Range(49, 50));
    }

    #[test]
    fn test_against_today() {
        let today = ParsedDate::today(NaiveDate::from_ymd_opt(2024, 10, 5).unwrap());
        let birth = parse_date("1990-10-05").unwrap();
        assert_eq!(estimate_age(&birth, &today), Age::Exact(34));

        let birth = parse_date("1990").unwrap();
        assert_eq!(estimate_age(&birth, &today), Age::Range(33, 34));
    }

    #[test]
    fn test_display() {
        assert_eq!(Age::Exact(10).to_string(), "10");
        assert_eq!(Age::Range(9, 10).to_string(), "9-10");
    }
}
