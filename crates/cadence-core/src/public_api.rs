//! Stable, public-facing helpers that wrap the engine services.
//!
//! Server handlers and client-side previews both go through these functions so
//! that "next recurrence" labels and window percentages are computed by one
//! implementation.

use cadence_domain::{window_for, DateWindow, IntervalKind, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    aggregator::{IntervalAggregator, IntervalProgress},
    listing::{annotate_next, TransactionListing},
    resolver::NextOccurrenceResolver,
    skip_registry::SkipRegistry,
    storage::TransactionStore,
    CoreError,
};

/// Resolves the window of `interval` (`weekly`, `biweekly`, `monthly`, `yearly`)
/// containing `reference`.
pub fn api_window_for(interval: &str, reference: NaiveDate) -> Result<DateWindow, CoreError> {
    let kind: IntervalKind = interval.parse()?;
    Ok(window_for(kind, reference)?)
}

/// Next recurrence of a single transaction using the default horizon.
pub fn api_next_recurrence(
    transaction: &Transaction,
    as_of: NaiveDate,
) -> Result<Option<NaiveDate>, CoreError> {
    NextOccurrenceResolver::default().next_occurrence_of(transaction, as_of)
}

/// Listing rows with their next recurrence, in input order.
pub fn api_list_with_next(
    transactions: &[Transaction],
    as_of: NaiveDate,
    horizon_years: u32,
) -> Result<Vec<TransactionListing>, CoreError> {
    annotate_next(
        &NextOccurrenceResolver::new(horizon_years),
        transactions,
        as_of,
    )
}

/// Total of `kind` inside the `interval` window containing `reference`.
pub fn api_total_in_window(
    transactions: &[Transaction],
    kind: TransactionKind,
    interval: &str,
    reference: NaiveDate,
    horizon_years: u32,
) -> Result<Decimal, CoreError> {
    let window = api_window_for(interval, reference)?;
    let totals = IntervalAggregator::new(horizon_years).totals_by_kind(transactions, window)?;
    Ok(totals.of(kind))
}

/// Budget (expense) or goal (income) progress for the `interval` window containing `reference`.
pub fn api_progress(
    transactions: &[Transaction],
    kind: TransactionKind,
    interval: &str,
    reference: NaiveDate,
    target: Decimal,
    horizon_years: u32,
) -> Result<IntervalProgress, CoreError> {
    let window = api_window_for(interval, reference)?;
    IntervalAggregator::new(horizon_years).progress(transactions, kind, window, target)
}

/// Skips one occurrence of a recurring transaction.
pub fn api_skip_occurrence(
    store: &dyn TransactionStore,
    transaction_id: Uuid,
    date: NaiveDate,
) -> Result<bool, CoreError> {
    SkipRegistry::new(store, transaction_id).add(date)
}
