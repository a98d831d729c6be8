//! Next-occurrence resolution for recurring series.

use cadence_domain::{
    add_years, first_occurrence_on_or_after, step, DomainError, SkipLookup, Transaction,
};
use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::{CoreError, DEFAULT_HORIZON_YEARS};

/// Finds the first occurrence strictly after a reference date that is not
/// skipped and does not lie past the lookahead horizon.
///
/// A future anchor counts as its own next occurrence; the series is never
/// advanced before the search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextOccurrenceResolver {
    horizon_years: u32,
}

impl Default for NextOccurrenceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_YEARS)
    }
}

impl NextOccurrenceResolver {
    pub fn new(horizon_years: u32) -> Self {
        Self { horizon_years }
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    /// Resolves against an explicit skip collaborator.
    ///
    /// Returns `Ok(None)` for one-time transactions and when every remaining
    /// occurrence up to `as_of + horizon` is skipped.
    pub fn next_occurrence<S>(
        &self,
        transaction: &Transaction,
        skips: &S,
        as_of: NaiveDate,
    ) -> Result<Option<NaiveDate>, CoreError>
    where
        S: SkipLookup + ?Sized,
    {
        if !transaction.is_recurring() {
            return Ok(None);
        }
        let horizon = add_years(as_of, self.horizon_years)?;
        let frequency = transaction.frequency;

        // Every occurrence on or before `as_of` is passed over regardless of skips.
        let after = as_of
            .checked_add_days(Days::new(1))
            .ok_or(DomainError::DateOutOfRange)?;
        let mut candidate =
            first_occurrence_on_or_after(transaction.anchor_date, frequency, after)?;
        loop {
            if candidate > horizon {
                debug!(
                    transaction = %transaction.id,
                    %as_of,
                    %horizon,
                    "no occurrence within horizon"
                );
                return Ok(None);
            }
            if !skips.is_skipped(candidate) {
                return Ok(Some(candidate));
            }
            candidate = step(candidate, frequency)?;
        }
    }

    /// Resolves using the transaction's own skipped dates.
    pub fn next_occurrence_of(
        &self,
        transaction: &Transaction,
        as_of: NaiveDate,
    ) -> Result<Option<NaiveDate>, CoreError> {
        self.next_occurrence(transaction, &transaction.skipped_dates, as_of)
    }
}
