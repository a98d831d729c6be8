//! Calendar-aware date stepping for recurring series.
//!
//! Month and year arithmetic clamps to the last valid day of the target month,
//! so a series anchored on the 31st lands on the 30th (or Feb 28/29) in shorter
//! months, and a Feb 29 anchor lands on Feb 28 in common years. A series is
//! always walked by stepping from its previous date.

use chrono::{Datelike, Days, NaiveDate};

use crate::{common::Frequency, error::DomainError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const WEEK_DAYS: u64 = 7;
const BIWEEK_DAYS: u64 = 14;

/// Returns the date one recurrence unit after `date`.
///
/// Month and year steps clamp to the last valid day of the target month and
/// continue from the clamped date, so Jan 31 steps to Feb 28 and then Mar 28.
/// `Frequency::Once` has no unit and fails with [`DomainError::InvalidFrequency`].
pub fn step(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate, DomainError> {
    match frequency {
        Frequency::Once => Err(DomainError::InvalidFrequency(frequency.to_string())),
        Frequency::Weekly => add_days(date, WEEK_DAYS),
        Frequency::Biweekly => add_days(date, BIWEEK_DAYS),
        Frequency::Monthly => shift_month(date, 1),
        Frequency::Yearly => add_years(date, 1),
    }
}

/// First date of the series anchored on `anchor` that falls on or after `date`.
///
/// Weekly and biweekly series jump straight to it since their steps are a
/// fixed number of days. Monthly and yearly series are stepped one unit at a
/// time from the anchor so clamped days carry forward exactly as [`step`] does.
pub fn first_occurrence_on_or_after(
    anchor: NaiveDate,
    frequency: Frequency,
    date: NaiveDate,
) -> Result<NaiveDate, DomainError> {
    if !frequency.is_recurring() {
        return Err(DomainError::InvalidFrequency(frequency.to_string()));
    }
    if date <= anchor {
        return Ok(anchor);
    }
    let span = match frequency {
        Frequency::Weekly => Some(WEEK_DAYS),
        Frequency::Biweekly => Some(BIWEEK_DAYS),
        _ => None,
    };
    if let Some(span) = span {
        let elapsed = (date - anchor).num_days().unsigned_abs();
        let units = elapsed.div_ceil(span);
        return add_days(anchor, units * span);
    }
    let mut current = anchor;
    while current < date {
        current = step(current, frequency)?;
    }
    Ok(current)
}

/// Adds whole calendar years, clamping Feb 29 to Feb 28 in common years.
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate, DomainError> {
    let year = i32::try_from(years)
        .ok()
        .and_then(|years| date.year().checked_add(years))
        .ok_or(DomainError::DateOutOfRange)?;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).ok_or(DomainError::DateOutOfRange)
}

/// Number of days in `month` (1-12) of `year`; zero for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 0,
    }
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(days))
        .ok_or(DomainError::DateOutOfRange)
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn shift_month(date: NaiveDate, months: i64) -> Result<NaiveDate, DomainError> {
    let index = month_index(date) + months;
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| DomainError::DateOutOfRange)?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DomainError::DateOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekly_and_biweekly_add_fixed_days() {
        let start = date(2025, 12, 29);
        assert_eq!(step(start, Frequency::Weekly).unwrap(), date(2026, 1, 5));
        assert_eq!(step(start, Frequency::Biweekly).unwrap(), date(2026, 1, 12));
    }

    #[test]
    fn monthly_clamps_to_end_of_february() {
        assert_eq!(
            step(date(2024, 1, 31), Frequency::Monthly).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            step(date(2025, 1, 31), Frequency::Monthly).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn monthly_clamps_into_thirty_day_months_and_wraps_years() {
        assert_eq!(
            step(date(2025, 3, 31), Frequency::Monthly).unwrap(),
            date(2025, 4, 30)
        );
        assert_eq!(
            step(date(2025, 12, 15), Frequency::Monthly).unwrap(),
            date(2026, 1, 15)
        );
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(
            step(date(2024, 2, 29), Frequency::Yearly).unwrap(),
            date(2025, 2, 28)
        );
        let mut current = date(2024, 2, 29);
        for _ in 0..4 {
            current = step(current, Frequency::Yearly).unwrap();
        }
        assert_eq!(current, date(2028, 2, 28));
    }

    #[test]
    fn once_cannot_be_stepped() {
        assert_eq!(
            step(date(2025, 1, 1), Frequency::Once),
            Err(DomainError::InvalidFrequency("once".into()))
        );
    }

    #[test]
    fn step_is_deterministic() {
        let anchor = date(2025, 5, 31);
        for frequency in Frequency::ALL.into_iter().filter(|f| f.is_recurring()) {
            assert_eq!(step(anchor, frequency), step(anchor, frequency));
        }
    }

    #[test]
    fn clamped_day_carries_into_later_months() {
        let feb = step(date(2025, 1, 31), Frequency::Monthly).unwrap();
        assert_eq!(feb, date(2025, 2, 28));
        assert_eq!(step(feb, Frequency::Monthly).unwrap(), date(2025, 3, 28));
        assert_eq!(
            first_occurrence_on_or_after(date(2025, 1, 31), Frequency::Monthly, date(2025, 3, 1))
                .unwrap(),
            date(2025, 3, 28)
        );
    }

    #[test]
    fn first_occurrence_matches_repeated_stepping() {
        let anchors = [date(2024, 1, 31), date(2024, 2, 29), date(2025, 1, 6), date(2025, 8, 30)];
        let targets = [date(2024, 1, 1), date(2025, 3, 1), date(2025, 3, 29), date(2027, 11, 15)];
        for anchor in anchors {
            for frequency in Frequency::ALL.into_iter().filter(|f| f.is_recurring()) {
                for target in targets {
                    let mut walked = anchor;
                    while walked < target {
                        walked = step(walked, frequency).unwrap();
                    }
                    assert_eq!(
                        first_occurrence_on_or_after(anchor, frequency, target).unwrap(),
                        walked,
                        "{anchor} {frequency} {target}"
                    );
                }
            }
        }
    }

    #[test]
    fn first_occurrence_jumps_fixed_day_series() {
        let anchor = date(2025, 1, 6);
        let first = |frequency, target| {
            first_occurrence_on_or_after(anchor, frequency, target).unwrap()
        };
        assert_eq!(first(Frequency::Weekly, date(2024, 1, 1)), anchor);
        assert_eq!(first(Frequency::Weekly, date(2025, 1, 13)), date(2025, 1, 13));
        assert_eq!(first(Frequency::Weekly, date(2025, 1, 14)), date(2025, 1, 20));
        assert_eq!(first(Frequency::Biweekly, date(2025, 1, 21)), date(2025, 2, 3));
        assert_eq!(
            first_occurrence_on_or_after(date(1990, 1, 1), Frequency::Weekly, date(2025, 1, 6))
                .unwrap(),
            date(2025, 1, 6)
        );
    }

    #[test]
    fn first_occurrence_rejects_once() {
        assert!(matches!(
            first_occurrence_on_or_after(date(2025, 1, 1), Frequency::Once, date(2025, 2, 1)),
            Err(DomainError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn parse_date_rejects_nonexistent_dates() {
        assert_eq!(parse_date("2025-02-28").unwrap(), date(2025, 2, 28));
        assert_eq!(
            parse_date("2025-02-30"),
            Err(DomainError::InvalidDate("2025-02-30".into()))
        );
        assert!(parse_date("yesterday").is_err());
    }
}
