//! Calendar month representation
//!
//! Every analytics bucket is a calendar month ("last month" is the previous
//! calendar month, never "30 days ago"). A `Month` is stored as its first day,
//! which keeps construction infallible once a valid date exists.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A calendar month, e.g. "2025-01"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// Create a month from a year and month number (1-12)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing a date
    pub fn containing(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Get the first day of this month
    pub fn start_date(&self) -> NaiveDate {
        self.0
    }

    /// Get the last day of this month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().0 - Days::new(1)
    }

    /// Check if a date falls within this month (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        Self(self.0 + Months::new(1))
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        self.months_before(1)
    }

    /// The month `n` calendar months before this one
    pub fn months_before(&self, n: u32) -> Self {
        Self(self.0 - Months::new(n))
    }

    /// The `count` months ending at (and including) this one, oldest first
    pub fn trailing(&self, count: u32) -> Vec<Self> {
        (0..count).rev().map(|i| self.months_before(i)).collect()
    }

    /// Abbreviated month name ("Jan"); carries no year
    pub fn short_label(&self) -> String {
        self.0.format("%b").to_string()
    }

    /// Parse a month string
    ///
    /// Formats: "2025-01", or a full date such as "2025-01-01" (the API's
    /// first-of-month budget dates), reduced to its month.
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::containing(date));
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }

        Self::new(year, month).ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(jan.start_date(), date(2025, 1, 1));
        assert_eq!(jan.end_date(), date(2025, 1, 31));

        let feb_leap = Month::new(2024, 2).unwrap();
        assert_eq!(feb_leap.end_date(), date(2024, 2, 29));
    }

    #[test]
    fn test_navigation_across_year_boundary() {
        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(jan.prev(), Month::new(2024, 12).unwrap());
        assert_eq!(Month::new(2024, 12).unwrap().next(), jan);
        assert_eq!(jan.months_before(5), Month::new(2024, 8).unwrap());
    }

    #[test]
    fn test_containing_and_contains() {
        let m = Month::containing(date(2025, 3, 31));
        assert_eq!(m, Month::new(2025, 3).unwrap());
        assert!(m.contains(date(2025, 3, 1)));
        assert!(m.contains(date(2025, 3, 31)));
        assert!(!m.contains(date(2025, 4, 1)));
    }

    #[test]
    fn test_trailing_is_oldest_first() {
        let months = Month::new(2025, 2).unwrap().trailing(6);
        let labels: Vec<_> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            labels,
            ["2024-09", "2024-10", "2024-11", "2024-12", "2025-01", "2025-02"]
        );
    }

    #[test]
    fn test_short_label() {
        assert_eq!(Month::new(2025, 1).unwrap().short_label(), "Jan");
        assert_eq!(Month::new(2024, 9).unwrap().short_label(), "Sep");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::parse("2025-01").unwrap(), Month::new(2025, 1).unwrap());
        assert_eq!(
            Month::parse("2025-06-01").unwrap(),
            Month::new(2025, 6).unwrap()
        );
        assert_eq!(Month::parse("2025-13"), Err(MonthParseError::InvalidMonth(13)));
        assert!(Month::parse("January").is_err());
    }

    #[test]
    fn test_serde_uses_display_form() {
        let m = Month::new(2025, 1).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2025-01\"");
        let back: Month = serde_json::from_str("\"2025-01-01\"").unwrap();
        assert_eq!(back, m);
    }
}
