//! Fiscal period labels and calendar-quarter date ranges.
//!
//! Maps a (calendar year, fiscal period) pair to the inclusive date interval
//! of that calendar quarter. Only calendar-aligned quarters are supported:
//! Q1 = Jan 1–Mar 31, Q2 = Apr 1–Jun 30, Q3 = Jul 1–Sep 30, Q4 = Oct 1–Dec 31.

use ronda_traits::{Date, Result, RondaError};
use std::fmt;
use std::str::FromStr;

/// A fiscal reporting period within a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiscalPeriod {
    /// First quarter, January through March.
    Q1,
    /// Second quarter, April through June.
    Q2,
    /// Third quarter, July through September.
    Q3,
    /// Fourth quarter, October through December.
    Q4,
}

impl FiscalPeriod {
    /// All four periods in calendar order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Parse a period label.
    ///
    /// Labels are case-sensitive and must be exactly one of `Q1`, `Q2`,
    /// `Q3`, `Q4`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidPeriod`] for any other label.
    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            other => Err(RondaError::InvalidPeriod(other.to_string())),
        }
    }

    /// The canonical label for this period.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// (start month, start day, end month, end day) of this quarter.
    const fn bounds(self) -> (u32, u32, u32, u32) {
        match self {
            Self::Q1 => (1, 1, 3, 31),
            Self::Q2 => (4, 1, 6, 30),
            Self::Q3 => (7, 1, 9, 30),
            Self::Q4 => (10, 1, 12, 31),
        }
    }
}

impl FromStr for FiscalPeriod {
    type Err = RondaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the inclusive [start, end] date range of a calendar quarter.
///
/// The four ranges of one year are pairwise disjoint and together partition
/// the year exactly. Pure function, no side effects.
///
/// # Errors
///
/// Returns [`RondaError::InvalidDate`] when the year is outside chrono's
/// representable range.
pub fn quarter_range(year: i32, period: FiscalPeriod) -> Result<(Date, Date)> {
    let (start_month, start_day, end_month, end_day) = period.bounds();
    let start = Date::from_ymd_opt(year, start_month, start_day)
        .ok_or_else(|| RondaError::InvalidDate(format!("year {year} out of range")))?;
    let end = Date::from_ymd_opt(year, end_month, end_day)
        .ok_or_else(|| RondaError::InvalidDate(format!("year {year} out of range")))?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_valid_labels() {
        assert_eq!(FiscalPeriod::parse("Q1").unwrap(), FiscalPeriod::Q1);
        assert_eq!(FiscalPeriod::parse("Q4").unwrap(), FiscalPeriod::Q4);
        assert_eq!("Q3".parse::<FiscalPeriod>().unwrap(), FiscalPeriod::Q3);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        for label in ["q1", "Q5", "Q 1", "1", "", "FY"] {
            let result = FiscalPeriod::parse(label);
            assert!(matches!(result, Err(RondaError::InvalidPeriod(_))), "{label}");
        }
    }

    #[test]
    fn test_quarter_boundaries() {
        let (start, end) = quarter_range(2023, FiscalPeriod::Q1).unwrap();
        assert_eq!(start, Date::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(end, Date::from_ymd_opt(2023, 3, 31).unwrap());

        let (start, end) = quarter_range(2023, FiscalPeriod::Q2).unwrap();
        assert_eq!(start, Date::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(end, Date::from_ymd_opt(2023, 6, 30).unwrap());

        let (start, end) = quarter_range(2023, FiscalPeriod::Q4).unwrap();
        assert_eq!(start, Date::from_ymd_opt(2023, 10, 1).unwrap());
        assert_eq!(end, Date::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_quarters_partition_the_year() {
        for year in [1999, 2020, 2023] {
            let mut expected = Date::from_ymd_opt(year, 1, 1).unwrap();
            for period in FiscalPeriod::ALL {
                let (start, end) = quarter_range(year, period).unwrap();
                assert!(start <= end);
                // Each quarter starts the day after the previous one ends.
                assert_eq!(start, expected);
                expected = end + Duration::days(1);
            }
            assert_eq!(expected, Date::from_ymd_opt(year + 1, 1, 1).unwrap());
        }
    }

    #[test]
    fn test_leap_year_does_not_shift_boundaries() {
        // Feb 29 exists in 2020 but Q1 still ends Mar 31.
        let (_, end) = quarter_range(2020, FiscalPeriod::Q1).unwrap();
        assert_eq!(end, Date::from_ymd_opt(2020, 3, 31).unwrap());
    }

    #[test]
    fn test_out_of_range_year() {
        let result = quarter_range(i32::MAX, FiscalPeriod::Q1);
        assert!(matches!(result, Err(RondaError::InvalidDate(_))));
    }

    #[test]
    fn test_display_roundtrip() {
        for period in FiscalPeriod::ALL {
            assert_eq!(FiscalPeriod::parse(period.as_str()).unwrap(), period);
        }
    }
}
