use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ForecastError, Result};

/// A (year, month) pair. Month is always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarMonth")]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawCalendarMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawCalendarMonth> for CalendarMonth {
    type Error = ForecastError;

    fn try_from(raw: RawCalendarMonth) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidMonth(month as i64));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by `months` (negative goes back), rolling the year over.
    pub fn offset(&self, months: i32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn succ(&self) -> Self {
        self.offset(1)
    }

    pub fn pred(&self) -> Self {
        self.offset(-1)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last calendar day of the month (leap years included).
    pub fn end_of_month(&self) -> Option<NaiveDate> {
        self.succ().first_day().and_then(|d| d.pred_opt())
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(matches!(
            CalendarMonth::new(2023, 0),
            Err(ForecastError::InvalidMonth(0))
        ));
        assert!(matches!(
            CalendarMonth::new(2023, 13),
            Err(ForecastError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_succ_rolls_over_year() {
        let dec = CalendarMonth::new(2023, 12).unwrap();
        assert_eq!(dec.succ(), CalendarMonth::new(2024, 1).unwrap());
    }

    #[test]
    fn test_pred_rolls_back_year() {
        let jan = CalendarMonth::new(2023, 1).unwrap();
        assert_eq!(jan.pred(), CalendarMonth::new(2022, 12).unwrap());
        assert_eq!(jan.offset(-2), CalendarMonth::new(2022, 11).unwrap());
    }

    #[test]
    fn test_offset_multiple_years() {
        let start = CalendarMonth::new(2023, 7).unwrap();
        assert_eq!(start.offset(29), CalendarMonth::new(2025, 12).unwrap());
        assert_eq!(start.offset(-19), CalendarMonth::new(2021, 12).unwrap());
    }

    #[test]
    fn test_end_of_month() {
        let feb = CalendarMonth::new(2023, 2).unwrap();
        assert_eq!(feb.end_of_month(), NaiveDate::from_ymd_opt(2023, 2, 28));

        let leap_feb = CalendarMonth::new(2024, 2).unwrap();
        assert_eq!(leap_feb.end_of_month(), NaiveDate::from_ymd_opt(2024, 2, 29));

        let dec = CalendarMonth::new(2022, 12).unwrap();
        assert_eq!(dec.end_of_month(), NaiveDate::from_ymd_opt(2022, 12, 31));
    }

    #[test]
    fn test_deserialize_checks_month() {
        let m: CalendarMonth = serde_json::from_str(r#"{"year":2023,"month":2}"#).unwrap();
        assert_eq!(m, CalendarMonth::new(2023, 2).unwrap());

        let err = serde_json::from_str::<CalendarMonth>(r#"{"year":2023,"month":0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid month"), "{err}");
        assert!(serde_json::from_str::<CalendarMonth>(r#"{"year":2023,"month":13}"#).is_err());
    }

    #[test]
    fn test_display() {
        let m = CalendarMonth::new(2023, 2).unwrap();
        assert_eq!(m.to_string(), "02-2023");
    }
}
