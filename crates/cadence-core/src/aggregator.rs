//! Window totals over collections of transactions, recurring or not.
//!
//! Totals are plain sums of `amount` per occurrence, so they can be computed
//! over any partition of the input and combined with `+`, as long as
//! materialized copies stay in the same part as their template.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use cadence_domain::{DateWindow, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::{
    expander::expand, legacy::reconcile_legacy, CoreError, DEFAULT_HORIZON_YEARS,
};

const PERCENT_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalAggregator {
    horizon_years: u32,
}

impl Default for IntervalAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_YEARS)
    }
}

impl IntervalAggregator {
    pub fn new(horizon_years: u32) -> Self {
        Self { horizon_years }
    }

    /// Sum of `amount` over every occurrence of every transaction in `window`.
    ///
    /// Materialized copies of a template in the same collection are not counted.
    pub fn total_in_interval(
        &self,
        transactions: &[Transaction],
        window: DateWindow,
    ) -> Result<Decimal, CoreError> {
        let mut total = Decimal::ZERO;
        for txn in &reconcile_legacy(transactions) {
            total += self.contribution(txn, window)?;
        }
        debug!(%window, transactions = transactions.len(), %total, "interval total");
        Ok(total)
    }

    /// Same as [`Self::total_in_interval`], split into incomes and expenses.
    pub fn totals_by_kind(
        &self,
        transactions: &[Transaction],
        window: DateWindow,
    ) -> Result<IntervalTotals, CoreError> {
        let mut totals = IntervalTotals::default();
        for txn in &reconcile_legacy(transactions) {
            let amount = self.contribution(txn, window)?;
            match txn.kind {
                TransactionKind::Income => totals.income += amount,
                TransactionKind::Expense => totals.expense += amount,
            }
        }
        Ok(totals)
    }

    /// Total of `kind` in `window` measured against `target`.
    pub fn progress(
        &self,
        transactions: &[Transaction],
        kind: TransactionKind,
        window: DateWindow,
        target: Decimal,
    ) -> Result<IntervalProgress, CoreError> {
        let total = self.totals_by_kind(transactions, window)?.of(kind);
        Ok(IntervalProgress {
            window,
            kind,
            total,
            target,
            percent: progress_percent(total, target),
        })
    }

    fn contribution(&self, txn: &Transaction, window: DateWindow) -> Result<Decimal, CoreError> {
        let count = expand(txn, &txn.skipped_dates, window, self.horizon_years)?.count();
        Ok(txn.amount * Decimal::from(count as u64))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl IntervalTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    pub fn of(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expense,
        }
    }
}

impl Add for IntervalTotals {
    type Output = IntervalTotals;

    fn add(self, rhs: IntervalTotals) -> IntervalTotals {
        IntervalTotals {
            income: self.income + rhs.income,
            expense: self.expense + rhs.expense,
        }
    }
}

impl AddAssign for IntervalTotals {
    fn add_assign(&mut self, rhs: IntervalTotals) {
        *self = *self + rhs;
    }
}

impl Sum for IntervalTotals {
    fn sum<I: Iterator<Item = IntervalTotals>>(iter: I) -> Self {
        iter.fold(IntervalTotals::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Backs budget, income-goal and savings percentages.
pub struct IntervalProgress {
    pub window: DateWindow,
    pub kind: TransactionKind,
    pub total: Decimal,
    pub target: Decimal,
    pub percent: Option<Decimal>,
}

/// Percentage of `target` reached by `total`, rounded to two decimals.
///
/// A zero target reports 100% once anything has been counted and `None` otherwise.
pub fn progress_percent(total: Decimal, target: Decimal) -> Option<Decimal> {
    if target.is_zero() {
        return if total.is_zero() {
            None
        } else {
            Some(Decimal::ONE_HUNDRED)
        };
    }
    let ratio = total.checked_div(target)?;
    ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|percent| percent.round_dp(PERCENT_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_domain::Frequency;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn two_weeks() -> DateWindow {
        DateWindow::new(date(2025, 1, 6), date(2025, 1, 19)).unwrap()
    }

    fn weekly_pair() -> Vec<Transaction> {
        vec![
            Transaction::expense(dec!(100), date(2025, 1, 6), Frequency::Weekly).unwrap(),
            Transaction::expense(dec!(50), date(2025, 1, 6), Frequency::Weekly).unwrap(),
        ]
    }

    #[test]
    fn sums_every_occurrence() {
        let total = IntervalAggregator::default()
            .total_in_interval(&weekly_pair(), two_weeks())
            .unwrap();
        assert_eq!(total, dec!(300));
    }

    #[test]
    fn order_does_not_matter() {
        let mut transactions = weekly_pair();
        transactions.push(
            Transaction::income(dec!(0.10), date(2025, 1, 7), Frequency::Once).unwrap(),
        );
        let aggregator = IntervalAggregator::default();
        let forward = aggregator.total_in_interval(&transactions, two_weeks()).unwrap();
        transactions.reverse();
        let backward = aggregator.total_in_interval(&transactions, two_weeks()).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, dec!(300.10));
    }

    #[test]
    fn partial_totals_combine_by_addition() {
        let mut transactions = weekly_pair();
        transactions.push(
            Transaction::income(dec!(1000), date(2025, 1, 10), Frequency::Biweekly).unwrap(),
        );
        let aggregator = IntervalAggregator::default();
        let whole = aggregator.totals_by_kind(&transactions, two_weeks()).unwrap();
        let chunked: IntervalTotals = transactions
            .chunks(2)
            .map(|chunk| aggregator.totals_by_kind(chunk, two_weeks()).unwrap())
            .sum();
        assert_eq!(whole, chunked);
        assert_eq!(whole.income, dec!(1000));
        assert_eq!(whole.expense, dec!(300));
        assert_eq!(whole.net(), dec!(700));
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let transactions: Vec<_> = (0..10)
            .map(|_| Transaction::expense(dec!(0.1), date(2025, 1, 6), Frequency::Once).unwrap())
            .collect();
        let total = IntervalAggregator::default()
            .total_in_interval(&transactions, two_weeks())
            .unwrap();
        assert_eq!(total, dec!(1.0));
    }

    #[test]
    fn materialized_copies_are_counted_once() {
        let template =
            Transaction::expense(dec!(50), date(2025, 1, 10), Frequency::Monthly).unwrap();
        let copy = Transaction::legacy_instance(&template, date(2025, 2, 10));
        let orphan = Transaction::legacy_instance(
            &Transaction::expense(dec!(7), date(2024, 1, 1), Frequency::Weekly).unwrap(),
            date(2025, 2, 3),
        );
        let feb = DateWindow::new(date(2025, 2, 1), date(2025, 2, 28)).unwrap();
        let aggregator = IntervalAggregator::default();

        let transactions = vec![template, copy, orphan];
        assert_eq!(aggregator.total_in_interval(&transactions, feb).unwrap(), dec!(57));
        assert_eq!(
            aggregator.totals_by_kind(&transactions, feb).unwrap().expense,
            dec!(57)
        );
    }

    #[test]
    fn progress_reports_percentage_of_target() {
        let progress = IntervalAggregator::default()
            .progress(&weekly_pair(), TransactionKind::Expense, two_weeks(), dec!(400))
            .unwrap();
        assert_eq!(progress.total, dec!(300));
        assert_eq!(progress.percent, Some(dec!(75.00)));
    }

    #[test]
    fn progress_percent_handles_zero_targets() {
        assert_eq!(progress_percent(dec!(0), dec!(0)), None);
        assert_eq!(progress_percent(dec!(5), dec!(0)), Some(dec!(100)));
        assert_eq!(progress_percent(dec!(1), dec!(3)), Some(dec!(33.33)));
    }
}
