//! Inclusive reporting windows and the resolver that maps an interval kind to
//! the period containing a reference date.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::{calendar::days_in_month, common::IntervalKind, error::DomainError};

/// Weeks always start on Monday.
pub const WEEK_START: Weekday = Weekday::Mon;

const BIWEEKLY_SPAN_DAYS: u64 = 14;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Calendar range with both bounds included.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-day window.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, counting both bounds.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Returns the period of `kind` that contains `reference`.
///
/// * weekly: Monday through Sunday.
/// * biweekly: that Monday through the Monday fourteen days later.
/// * monthly: first through last day of the month.
/// * yearly: January 1 through December 31.
pub fn window_for(kind: IntervalKind, reference: NaiveDate) -> Result<DateWindow, DomainError> {
    match kind {
        IntervalKind::Weekly => {
            let start = week_start(reference)?;
            DateWindow::new(start, offset(start, 6)?)
        }
        IntervalKind::Biweekly => {
            let start = week_start(reference)?;
            DateWindow::new(start, offset(start, BIWEEKLY_SPAN_DAYS)?)
        }
        IntervalKind::Monthly => {
            let start = reference.with_day(1).ok_or(DomainError::DateOutOfRange)?;
            let last = days_in_month(reference.year(), reference.month());
            let end = reference.with_day(last).ok_or(DomainError::DateOutOfRange)?;
            DateWindow::new(start, end)
        }
        IntervalKind::Yearly => {
            let year = reference.year();
            let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DomainError::DateOutOfRange)?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DomainError::DateOutOfRange)?;
            DateWindow::new(start, end)
        }
    }
}

/// Same as [`window_for`] for an instant already expressed in the reference zone.
pub fn window_for_instant(
    kind: IntervalKind,
    reference: NaiveDateTime,
) -> Result<DateWindow, DomainError> {
    window_for(kind, reference.date())
}

fn week_start(reference: NaiveDate) -> Result<NaiveDate, DomainError> {
    let delta = (7 + reference.weekday().num_days_from_monday()
        - WEEK_START.num_days_from_monday())
        % 7;
    reference
        .checked_sub_days(Days::new(u64::from(delta)))
        .ok_or(DomainError::DateOutOfRange)
}

fn offset(date: NaiveDate, days: u64) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(days))
        .ok_or(DomainError::DateOutOfRange)
}
