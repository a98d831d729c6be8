//! Reconciliation of rows written by the retired bulk-materialization path.
//!
//! Templates are expanded virtually, so a materialized copy whose template is
//! present would be counted twice. Copies whose template is gone are kept and
//! read as one-time entries on their own date.

use std::collections::HashSet;

use cadence_domain::{Frequency, Transaction};
use tracing::debug;
use uuid::Uuid;

pub fn reconcile_legacy(transactions: &[Transaction]) -> Vec<Transaction> {
    let templates: HashSet<Uuid> = transactions
        .iter()
        .filter(|txn| txn.is_original)
        .map(|txn| txn.id)
        .collect();

    let mut dropped = 0usize;
    let reconciled: Vec<Transaction> = transactions
        .iter()
        .filter_map(|txn| {
            if txn.is_original {
                return Some(txn.clone());
            }
            match txn.original_id {
                Some(template) if templates.contains(&template) => {
                    dropped += 1;
                    None
                }
                _ => Some(Transaction {
                    frequency: Frequency::Once,
                    ..txn.clone()
                }),
            }
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "ignored materialized copies of recurring templates");
    }
    reconciled
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn copies_of_present_templates_are_dropped() {
        let template = Transaction::expense(dec!(80), date(1, 1), Frequency::Monthly).unwrap();
        let copies: Vec<_> = (2..=4)
            .map(|month| Transaction::legacy_instance(&template, date(month, 1)))
            .collect();
        let mut all = vec![template.clone()];
        all.extend(copies);

        let reconciled = reconcile_legacy(&all);
        assert_eq!(reconciled, vec![template]);
    }

    #[test]
    fn orphaned_copies_become_one_time_entries() {
        let template = Transaction::expense(dec!(80), date(1, 1), Frequency::Monthly).unwrap();
        let orphan = Transaction::legacy_instance(&template, date(2, 1));

        let reconciled = reconcile_legacy(std::slice::from_ref(&orphan));
        assert_eq!(reconciled.len(), 1);
        assert_eq!(reconciled[0].id, orphan.id);
        assert_eq!(reconciled[0].frequency, Frequency::Once);
        assert_eq!(reconciled[0].anchor_date, date(2, 1));
    }
}
