//! Listing rows annotated with their next recurrence.

use cadence_domain::Transaction;
use chrono::NaiveDate;
use serde::Serialize;

use crate::{resolver::NextOccurrenceResolver, CoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListing {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub next_recurrence: Option<NaiveDate>,
}

/// Attaches the next occurrence after `as_of` to every transaction, keeping input order.
///
/// Materialized copies never recur: their template carries the series, and an
/// orphaned copy is a one-time entry.
pub fn annotate_next(
    resolver: &NextOccurrenceResolver,
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> Result<Vec<TransactionListing>, CoreError> {
    transactions
        .iter()
        .map(|txn| {
            let next_recurrence = if txn.is_legacy_instance() {
                None
            } else {
                resolver.next_occurrence_of(txn, as_of)?
            };
            Ok(TransactionListing {
                next_recurrence,
                transaction: txn.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_domain::Frequency;
    use rust_decimal_macros::dec;

    #[test]
    fn listing_serializes_flat_with_next_recurrence() {
        let anchor = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let weekly = Transaction::income(dec!(10), anchor, Frequency::Weekly).unwrap();
        let once = Transaction::income(dec!(10), anchor, Frequency::Once).unwrap();

        let rows = annotate_next(&NextOccurrenceResolver::default(), &[weekly, once], as_of)
            .unwrap();
        assert_eq!(rows[0].next_recurrence, NaiveDate::from_ymd_opt(2025, 1, 13));
        assert_eq!(rows[1].next_recurrence, None);

        let value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["nextRecurrence"], "2025-01-13");
        assert_eq!(value["anchorDate"], "2025-01-06");
    }

    #[test]
    fn materialized_copies_have_no_next_recurrence() {
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let anchor = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let template = Transaction::expense(dec!(50), anchor, Frequency::Monthly).unwrap();
        let copy = Transaction::legacy_instance(
            &template,
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        );
        let orphan = Transaction::legacy_instance(
            &Transaction::expense(dec!(9), anchor, Frequency::Weekly).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        );

        let rows = annotate_next(
            &NextOccurrenceResolver::default(),
            &[template, copy, orphan],
            as_of,
        )
        .unwrap();
        assert_eq!(rows[0].next_recurrence, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(rows[1].next_recurrence, None);
        assert_eq!(rows[2].next_recurrence, None);
    }
}
