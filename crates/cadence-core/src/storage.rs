use std::{collections::HashSet, sync::RwLock};

use cadence_domain::Transaction;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::CoreError;

/// Persistence collaborator that owns transaction records.
///
/// The engine only reads records and appends skipped dates; creating and
/// deleting records is left to the surrounding CRUD layer.
pub trait TransactionStore: Send + Sync {
    fn list(&self) -> Result<Vec<Transaction>, CoreError>;
    fn load(&self, id: Uuid) -> Result<Transaction, CoreError>;
    fn save(&self, transaction: &Transaction) -> Result<(), CoreError>;
    /// Appends `date` to the record's skip set. Returns false when it was already present.
    fn append_skipped_date(&self, id: Uuid, date: NaiveDate) -> Result<bool, CoreError>;
}

/// Process-local store, used for previews and tests.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    records: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            records: RwLock::new(transactions.into_iter().collect()),
        }
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("transaction store lock poisoned".into())
}

impl TransactionStore for InMemoryTransactionStore {
    fn list(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.records.read().map_err(poisoned)?.clone())
    }

    fn load(&self, id: Uuid) -> Result<Transaction, CoreError> {
        self.records
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|txn| txn.id == id)
            .cloned()
            .ok_or(CoreError::TransactionNotFound(id))
    }

    fn save(&self, transaction: &Transaction) -> Result<(), CoreError> {
        transaction.validate()?;
        let mut records = self.records.write().map_err(poisoned)?;
        match records.iter_mut().find(|txn| txn.id == transaction.id) {
            Some(existing) => *existing = transaction.clone(),
            None => records.push(transaction.clone()),
        }
        Ok(())
    }

    fn append_skipped_date(&self, id: Uuid, date: NaiveDate) -> Result<bool, CoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let txn = records
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        Ok(txn.skip_date(date))
    }
}

/// Detects records the engine accepts but that point at data-quality problems.
pub fn transaction_warnings(transactions: &[Transaction]) -> Vec<String> {
    let ids: HashSet<_> = transactions.iter().map(|txn| txn.id).collect();
    let mut warnings = Vec::new();

    for txn in transactions {
        if !txn.is_recurring() && !txn.skipped_dates.is_empty() {
            warnings.push(format!(
                "transaction {} is one-time but has {} skipped date(s)",
                txn.id,
                txn.skipped_dates.len()
            ));
        }
        if let Some(first) = txn.skipped_dates.iter().next() {
            if first < txn.anchor_date {
                warnings.push(format!(
                    "transaction {} skips {} before its anchor {}",
                    txn.id, first, txn.anchor_date
                ));
            }
        }
        if txn.is_legacy_instance() {
            match txn.original_id {
                Some(template) if ids.contains(&template) => warnings.push(format!(
                    "transaction {} is a materialized copy of {}",
                    txn.id, template
                )),
                Some(template) => warnings.push(format!(
                    "transaction {} is a materialized copy of missing template {}",
                    txn.id, template
                )),
                None => warnings.push(format!(
                    "transaction {} is marked as a copy without a template",
                    txn.id
                )),
            }
        }
    }
    warnings
}
