//! Lazy expansion of a transaction into its occurrences inside a window.

use std::fmt;

use cadence_domain::{
    add_years, first_occurrence_on_or_after, step, DateWindow, Frequency, SkipLookup,
    Transaction, TransactionKind,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::{legacy::reconcile_legacy, CoreError};

/// Occurrence dates of one transaction inside an inclusive window.
///
/// The sequence is finite: it stops at the window end or at
/// `window.start + horizon_years`, whichever comes first. Call
/// [`Occurrences::restart`] to iterate again from the beginning.
pub struct Occurrences<'a, S: ?Sized> {
    frequency: Frequency,
    window: DateWindow,
    limit: NaiveDate,
    skips: &'a S,
    first: NaiveDate,
    next: Option<NaiveDate>,
}

impl<'a, S: SkipLookup + ?Sized> Occurrences<'a, S> {
    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Last date the sequence may visit.
    pub fn limit(&self) -> NaiveDate {
        self.limit
    }

    pub fn restart(&self) -> Self {
        Self {
            next: Some(self.first),
            ..self.clone()
        }
    }
}

impl<S: ?Sized> Clone for Occurrences<'_, S> {
    fn clone(&self) -> Self {
        Self {
            frequency: self.frequency,
            window: self.window,
            limit: self.limit,
            skips: self.skips,
            first: self.first,
            next: self.next,
        }
    }
}

impl<S: ?Sized> fmt::Debug for Occurrences<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Occurrences")
            .field("frequency", &self.frequency)
            .field("window", &self.window)
            .field("limit", &self.limit)
            .field("next", &self.next)
            .finish()
    }
}

impl<S: SkipLookup + ?Sized> Iterator for Occurrences<'_, S> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let recurring = self.frequency.is_recurring();
        loop {
            let current = self.next.take()?;
            if current > self.limit {
                return None;
            }
            if recurring {
                // `expand` checked that a full year past `limit` is representable.
                self.next = step(current, self.frequency).ok();
            }
            if current < self.window.start || (recurring && self.skips.is_skipped(current)) {
                continue;
            }
            return Some(current);
        }
    }
}

/// Expands `transaction` over `window` using `skips` as the skip collaborator.
///
/// Recurring series are walked by repeated [`step`] from the anchor. One-time
/// transactions yield their anchor at most once and ignore skips.
pub fn expand<'a, S>(
    transaction: &Transaction,
    skips: &'a S,
    window: DateWindow,
    horizon_years: u32,
) -> Result<Occurrences<'a, S>, CoreError>
where
    S: SkipLookup + ?Sized,
{
    let horizon = add_years(window.start, horizon_years)?;
    let limit = window.end.min(horizon);
    // The longest step is one year, so no step from a date up to `limit` can overflow.
    add_years(limit, 1)?;
    let anchor = transaction.anchor_date;
    let first = if transaction.is_recurring() {
        first_occurrence_on_or_after(anchor, transaction.frequency, window.start)?
    } else {
        anchor
    };
    Ok(Occurrences {
        frequency: transaction.frequency,
        window,
        limit,
        skips,
        first,
        next: Some(first),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Display projection of a single virtual occurrence. Never persisted.
pub struct Occurrence {
    pub transaction_id: Uuid,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Collects the occurrences of every transaction inside `window`, ordered by date.
///
/// Materialized copies are reconciled first, so a template and its copies are
/// not listed twice.
pub fn expand_occurrences(
    transactions: &[Transaction],
    window: DateWindow,
    horizon_years: u32,
) -> Result<Vec<Occurrence>, CoreError> {
    let mut occurrences = Vec::new();
    for txn in &reconcile_legacy(transactions) {
        let dates = expand(txn, &txn.skipped_dates, window, horizon_years)?;
        occurrences.extend(dates.map(|date| Occurrence {
            transaction_id: txn.id,
            kind: txn.kind,
            date,
            amount: txn.amount,
        }));
    }
    occurrences.sort_by_key(|occurrence| (occurrence.date, occurrence.transaction_id));
    Ok(occurrences)
}
