//! Calendar day handling and Turkish date labels

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Leap year used to validate month/day pairs so that February 29 is accepted
const REFERENCE_YEAR: i32 = 2000;

const TURKISH_MONTHS: [(&str, &str); 12] = [
    ("January", "Ocak"),
    ("February", "Şubat"),
    ("March", "Mart"),
    ("April", "Nisan"),
    ("May", "Mayıs"),
    ("June", "Haziran"),
    ("July", "Temmuz"),
    ("August", "Ağustos"),
    ("September", "Eylül"),
    ("October", "Ekim"),
    ("November", "Kasım"),
    ("December", "Aralık"),
];

/// A calendar day without a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Create a validated month/day pair
    pub fn new(month: u32, day: u32) -> Result<Self, ApiError> {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
            .map(|_| Self { month, day })
            .ok_or(ApiError::InvalidDate { month, day })
    }

    /// Today in local time
    pub fn today() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Month/day of a full date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Parse "July 20", "Jul 20", "7/20" or "7-20"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some((m, d)) = s.split_once(['/', '-']) {
            let month = m.trim().parse().ok()?;
            let day = d.trim().parse().ok()?;
            return Self::new(month, day).ok();
        }

        let with_year = format!("{s} {REFERENCE_YEAR}");
        ["%B %d %Y", "%b %d %Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
            .map(Self::from_date)
    }

    /// Month (1-12)
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Day of month (1-31)
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// English label as used by the history API, e.g. "July 20"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, self.month, self.day)
            .map_or_else(|| format!("{}/{}", self.month, self.day), |d| d.format("%B %-d").to_string())
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Turn an English day label ("July 20") into Turkish ("20 Temmuz").
///
/// Unknown month names are kept as they are.
pub fn format_turkish_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }

    let mut parts = date.split(' ');
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();

    let turkish = TURKISH_MONTHS
        .iter()
        .find(|(en, _)| *en == month)
        .map_or(month, |(_, tr)| *tr);

    format!("{day} {turkish}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(MonthDay::new(2, 29).is_ok());
        assert!(MonthDay::new(2, 30).is_err());
        assert!(MonthDay::new(13, 1).is_err());
        assert!(MonthDay::new(0, 1).is_err());
    }

    #[test]
    fn test_parse_formats() {
        let expected = MonthDay::new(7, 20).unwrap();
        assert_eq!(MonthDay::parse("July 20"), Some(expected));
        assert_eq!(MonthDay::parse("Jul 20"), Some(expected));
        assert_eq!(MonthDay::parse("7/20"), Some(expected));
        assert_eq!(MonthDay::parse("7-20"), Some(expected));
        assert_eq!(MonthDay::parse("Smarch 3"), None);
        assert_eq!(MonthDay::parse("4/31"), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(MonthDay::new(1, 5).unwrap().label(), "January 5");
        assert_eq!(MonthDay::new(12, 31).unwrap().to_string(), "December 31");
    }

    #[test]
    fn test_format_turkish_date() {
        assert_eq!(format_turkish_date("January 5"), "5 Ocak");
        assert_eq!(format_turkish_date("August 30"), "30 Ağustos");
        assert_eq!(format_turkish_date(""), "");
        assert_eq!(format_turkish_date("Smarch 3"), "3 Smarch");
    }
}
