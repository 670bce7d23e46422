use chrono::{Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// How often a `Reminder` repeats. `Once` reminders never
/// advance to a next occurrence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let freq = match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        write!(f, "{}", freq)
    }
}

#[derive(Error, Debug)]
pub enum InvalidFrequencyError {
    #[error("Invalid frequency specified: {0}")]
    Malformed(String),
}

impl FromStr for Frequency {
    type Err = InvalidFrequencyError;

    fn from_str(freq: &str) -> Result<Self, Self::Err> {
        match freq.to_lowercase().as_str() {
            "once" => Ok(Self::Once),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(InvalidFrequencyError::Malformed(freq.to_string())),
        }
    }
}

/// Computes the due date of the occurrence following `due_date`, or `None`
/// when the series does not continue.
///
/// Monthly and yearly steps clamp the day-of-month to the last day of the
/// target month when the source day does not exist there: Jan 31 advances to
/// Feb 29 in leap years and Feb 28 otherwise, and a yearly series anchored on
/// Feb 29 lands on Feb 28 in non-leap years. Time of day is preserved.
///
/// A `repeat_until` boundary that already lies in the past relative to `now`
/// ends the series before any date arithmetic, and a computed candidate
/// beyond `repeat_until` ends it as well.
pub fn next_occurrence(
    due_date: i64,
    frequency: Frequency,
    repeat_until: Option<i64>,
    now: i64,
) -> Option<i64> {
    if let Some(until) = repeat_until {
        if until < now {
            return None;
        }
    }

    let candidate = match frequency {
        Frequency::Once => return None,
        Frequency::Daily => due_date + DAY_MILLIS,
        Frequency::Weekly => due_date + 7 * DAY_MILLIS,
        Frequency::Monthly => shift_months(due_date, 1),
        Frequency::Yearly => shift_years(due_date, 1),
    };

    match repeat_until {
        Some(until) if candidate > until => None,
        _ => Some(candidate),
    }
}

fn shift_months(ts: i64, months: u32) -> i64 {
    let dt = Utc.timestamp_millis(ts);
    let month0 = dt.month0() + months;
    let year = dt.year() + (month0 / 12) as i32;
    let month = month0 % 12 + 1;
    let day = std::cmp::min(dt.day(), days_in_month(year, month));
    Utc.ymd(year, month, day)
        .and_hms_milli(
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.timestamp_subsec_millis(),
        )
        .timestamp_millis()
}

fn shift_years(ts: i64, years: i32) -> i64 {
    let dt = Utc.timestamp_millis(ts);
    let year = dt.year() + years;
    let day = std::cmp::min(dt.day(), days_in_month(year, dt.month()));
    Utc.ymd(year, dt.month(), day)
        .and_hms_milli(
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.timestamp_subsec_millis(),
        )
        .timestamp_millis()
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("Month out of range: {}", month),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32) -> i64 {
        Utc.ymd(year, month, day)
            .and_hms(hour, min, 0)
            .timestamp_millis()
    }

    #[test]
    fn parses_valid_frequency_str() {
        assert_eq!("once".parse::<Frequency>().unwrap(), Frequency::Once);
        assert_eq!("Daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("WEEKLY".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("yearly".parse::<Frequency>().unwrap(), Frequency::Yearly);
    }

    #[test]
    fn rejects_invalid_frequency_str() {
        assert!("".parse::<Frequency>().is_err());
        assert!("hourly".parse::<Frequency>().is_err());
        assert!("every day".parse::<Frequency>().is_err());
    }

    #[test]
    fn once_never_advances() {
        let due = ts(2024, 3, 10, 9, 0);
        assert_eq!(next_occurrence(due, Frequency::Once, None, 0), None);
    }

    #[test]
    fn daily_advances_one_day() {
        let due = ts(2024, 3, 10, 9, 30);
        assert_eq!(
            next_occurrence(due, Frequency::Daily, None, 0),
            Some(ts(2024, 3, 11, 9, 30))
        );
    }

    #[test]
    fn weekly_advances_seven_days() {
        let due = ts(2024, 2, 26, 18, 0);
        assert_eq!(
            next_occurrence(due, Frequency::Weekly, None, 0),
            Some(ts(2024, 3, 4, 18, 0))
        );
    }

    #[test]
    fn monthly_clamps_to_end_of_february_in_leap_year() {
        let due = ts(2024, 1, 31, 12, 0);
        assert_eq!(
            next_occurrence(due, Frequency::Monthly, None, 0),
            Some(ts(2024, 2, 29, 12, 0))
        );
    }

    #[test]
    fn monthly_clamps_to_end_of_february_in_common_year() {
        let due = ts(2023, 1, 31, 12, 0);
        assert_eq!(
            next_occurrence(due, Frequency::Monthly, None, 0),
            Some(ts(2023, 2, 28, 12, 0))
        );
    }

    #[test]
    fn monthly_advances_across_year_boundary() {
        let due = ts(2023, 12, 15, 8, 0);
        assert_eq!(
            next_occurrence(due, Frequency::Monthly, None, 0),
            Some(ts(2024, 1, 15, 8, 0))
        );
    }

    #[test]
    fn monthly_keeps_day_when_it_exists_in_target_month() {
        let due = ts(2024, 2, 29, 10, 0);
        assert_eq!(
            next_occurrence(due, Frequency::Monthly, None, 0),
            Some(ts(2024, 3, 29, 10, 0))
        );
    }

    #[test]
    fn yearly_advances_one_year() {
        let due = ts(2024, 6, 1, 7, 45);
        assert_eq!(
            next_occurrence(due, Frequency::Yearly, None, 0),
            Some(ts(2025, 6, 1, 7, 45))
        );
    }

    #[test]
    fn yearly_clamps_leap_day_in_common_year() {
        let due = ts(2024, 2, 29, 10, 0);
        assert_eq!(
            next_occurrence(due, Frequency::Yearly, None, 0),
            Some(ts(2025, 2, 28, 10, 0))
        );
    }

    #[test]
    fn repeat_until_stops_series() {
        let due = ts(2024, 3, 10, 9, 0);
        let until = due + 3 * DAY_MILLIS;
        assert_eq!(
            next_occurrence(due, Frequency::Weekly, Some(until), 0),
            None
        );
    }

    #[test]
    fn repeat_until_in_the_past_stops_series_before_arithmetic() {
        let due = ts(2024, 3, 10, 9, 0);
        let until = due + 30 * DAY_MILLIS;
        let now = until + 1;
        assert_eq!(
            next_occurrence(due, Frequency::Daily, Some(until), now),
            None
        );
    }

    #[test]
    fn repeat_until_allows_candidate_on_boundary() {
        let due = ts(2024, 3, 10, 9, 0);
        let until = due + 7 * DAY_MILLIS;
        assert_eq!(
            next_occurrence(due, Frequency::Weekly, Some(until), 0),
            Some(until)
        );
    }

    #[test]
    fn preserves_time_of_day_across_month_step() {
        let due = Utc
            .ymd(2024, 5, 31)
            .and_hms_milli(23, 59, 59, 123)
            .timestamp_millis();
        let next = next_occurrence(due, Frequency::Monthly, None, 0).unwrap();
        let next_dt = Utc.timestamp_millis(next);
        assert_eq!(next_dt.day(), 30);
        assert_eq!(next_dt.month(), 6);
        assert_eq!(next_dt.hour(), 23);
        assert_eq!(next_dt.minute(), 59);
        assert_eq!(next_dt.second(), 59);
        assert_eq!(next_dt.timestamp_subsec_millis(), 123);
    }
}
