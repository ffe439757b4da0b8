//! Core data model for the analysis pipeline
//!
//! Records are immutable once loaded; filtering builds new collections and
//! never mutates the source.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::consts::{DAY_NAMES, MONTH_NAMES};
use crate::error::AppError;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One bicycle rental event.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TripRecord {
    pub(crate) start_time: NaiveDateTime,
    pub(crate) end_time: NaiveDateTime,
    pub(crate) start_station: String,
    pub(crate) end_station: String,
    /// Seconds, non-negative.
    pub(crate) trip_duration: f64,
    pub(crate) user_type: String,
    pub(crate) gender: Option<String>,
    pub(crate) birth_year: Option<i32>,
    /// Derived from `start_time` when the record is built; always consistent
    /// with it.
    pub(crate) month: u32,
    pub(crate) day_of_week: Weekday,
    pub(crate) day_of_month: u32,
    pub(crate) hour: u32,
}

impl TripRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: String,
        end_station: String,
        trip_duration: f64,
        user_type: String,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        TripRecord {
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            day_of_month: start_time.day(),
            hour: start_time.hour(),
            start_time,
            end_time,
            start_station,
            end_station,
            trip_duration,
            user_type,
            gender,
            birth_year,
        }
    }
}

/// Which optional columns the source schema carries; city-dependent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SchemaCaps {
    pub(crate) has_gender: bool,
    pub(crate) has_birth_year: bool,
}

/// Ordered sequence of trip records plus the schema capabilities of the
/// source they came from. Ordering reflects source-file order and survives
/// filtering.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordCollection {
    pub(crate) records: Vec<TripRecord>,
    pub(crate) caps: SchemaCaps,
}

impl RecordCollection {
    pub(crate) fn new(records: Vec<TripRecord>, caps: SchemaCaps) -> Self {
        RecordCollection { records, caps }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Month selector: `all` or one of the six covered months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MonthFilter {
    All,
    In(u32),
}

impl MonthFilter {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let lower = input.trim().to_ascii_lowercase();
        if lower == "all" {
            return Ok(MonthFilter::All);
        }
        match MONTH_NAMES.iter().position(|m| *m == lower) {
            Some(i) => Ok(MonthFilter::In(i as u32 + 1)),
            None => Err(AppError::InvalidSelection {
                input: input.trim().to_string(),
                expected: selector_list(&MONTH_NAMES),
            }),
        }
    }

    pub(crate) fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::In(m) => m == month,
        }
    }
}

/// Day-of-week selector: `all` or a weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayFilter {
    All,
    On(Weekday),
}

impl DayFilter {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let lower = input.trim().to_ascii_lowercase();
        if lower == "all" {
            return Ok(DayFilter::All);
        }
        match DAY_NAMES.iter().position(|d| *d == lower) {
            Some(i) => Ok(DayFilter::On(WEEKDAYS[i])),
            None => Err(AppError::InvalidSelection {
                input: input.trim().to_string(),
                expected: selector_list(&DAY_NAMES),
            }),
        }
    }

    pub(crate) fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::On(d) => d == day,
        }
    }
}

fn selector_list(names: &[&str]) -> String {
    let mut out = String::from("all");
    for name in names {
        out.push_str(", ");
        out.push_str(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn record(start: &str) -> TripRecord {
        TripRecord::new(
            ts(start),
            ts(start),
            "A".into(),
            "B".into(),
            60.0,
            "Subscriber".into(),
            None,
            None,
        )
    }

    #[test]
    fn derived_fields_follow_start_time() {
        // 2017-06-23 was a Friday.
        let r = record("2017-06-23 17:05");
        assert_eq!(r.month, 6);
        assert_eq!(r.day_of_week, Weekday::Fri);
        assert_eq!(r.day_of_month, 23);
        assert_eq!(r.hour, 17);
    }

    #[test]
    fn derived_fields_midnight_first_of_month() {
        let r = record("2017-01-01 00:00");
        assert_eq!(r.month, 1);
        assert_eq!(r.day_of_week, Weekday::Sun);
        assert_eq!(r.day_of_month, 1);
        assert_eq!(r.hour, 0);
    }

    #[test]
    fn month_filter_parses_all_and_names() {
        assert_eq!(MonthFilter::parse("all").unwrap(), MonthFilter::All);
        assert_eq!(MonthFilter::parse("january").unwrap(), MonthFilter::In(1));
        assert_eq!(MonthFilter::parse("june").unwrap(), MonthFilter::In(6));
        assert_eq!(MonthFilter::parse("  MARCH ").unwrap(), MonthFilter::In(3));
    }

    #[test]
    fn month_filter_rejects_out_of_coverage() {
        // July onward is outside the datasets' coverage, not a calendar bug.
        let err = MonthFilter::parse("july").unwrap_err();
        assert!(err.to_string().contains("\"july\" is not one of"));
        assert!(MonthFilter::parse("13").is_err());
    }

    #[test]
    fn day_filter_parses_case_insensitively() {
        assert_eq!(DayFilter::parse("all").unwrap(), DayFilter::All);
        assert_eq!(
            DayFilter::parse("Monday").unwrap(),
            DayFilter::On(Weekday::Mon)
        );
        assert_eq!(
            DayFilter::parse("SUNDAY").unwrap(),
            DayFilter::On(Weekday::Sun)
        );
        assert!(DayFilter::parse("someday").is_err());
    }

    #[test]
    fn filters_match() {
        assert!(MonthFilter::All.matches(12));
        assert!(MonthFilter::In(2).matches(2));
        assert!(!MonthFilter::In(2).matches(3));
        assert!(DayFilter::All.matches(Weekday::Wed));
        assert!(DayFilter::On(Weekday::Wed).matches(Weekday::Wed));
        assert!(!DayFilter::On(Weekday::Wed).matches(Weekday::Thu));
    }

    #[test]
    fn invalid_selection_lists_choices() {
        let err = DayFilter::parse("noday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"noday\" is not one of: all, monday, tuesday, wednesday, thursday, friday, saturday, sunday"
        );
    }
}
