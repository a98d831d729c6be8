//! Skip registry scoped to one recurring transaction.

use cadence_domain::{SkipLookup, SkipSet};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{storage::TransactionStore, CoreError};

/// Reads and appends the skipped dates of a single series through the store.
///
/// There is no removal: once a date is skipped it stays skipped.
pub struct SkipRegistry<'a> {
    store: &'a dyn TransactionStore,
    transaction_id: Uuid,
}

impl<'a> SkipRegistry<'a> {
    pub fn new(store: &'a dyn TransactionStore, transaction_id: Uuid) -> Self {
        Self {
            store,
            transaction_id,
        }
    }

    pub fn transaction_id(&self) -> Uuid {
        self.transaction_id
    }

    pub fn is_skipped(&self, date: NaiveDate) -> Result<bool, CoreError> {
        Ok(self.snapshot()?.is_skipped(date))
    }

    /// Current skip set, detached from the store.
    pub fn snapshot(&self) -> Result<SkipSet, CoreError> {
        Ok(self.store.load(self.transaction_id)?.skipped_dates)
    }

    /// Skips `date` for this series, returning whether it was newly added.
    ///
    /// Repeating a skip is a no-op. One-time transactions cannot be skipped.
    pub fn add(&self, date: NaiveDate) -> Result<bool, CoreError> {
        let txn = self.store.load(self.transaction_id)?;
        if !txn.is_recurring() {
            return Err(CoreError::InvalidOperation(format!(
                "transaction {} does not recur",
                self.transaction_id
            )));
        }
        if txn.skipped_dates.contains(date) {
            warn!(transaction = %self.transaction_id, %date, "date already skipped");
            return Ok(false);
        }
        let added = self.store.append_skipped_date(self.transaction_id, date)?;
        if added {
            info!(transaction = %self.transaction_id, %date, "skipped occurrence");
        } else {
            warn!(transaction = %self.transaction_id, %date, "concurrent skip already recorded");
        }
        Ok(added)
    }
}
