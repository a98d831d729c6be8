//! Income and expense records, recurring or one-time.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::Frequency, error::DomainError, skip::SkipSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub anchor_date: NaiveDate,
    pub frequency: Frequency,
    #[serde(default)]
    pub skipped_dates: SkipSet,
    #[serde(default = "Transaction::default_is_original")]
    pub is_original: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        anchor_date: NaiveDate,
        frequency: Frequency,
    ) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            anchor_date,
            frequency,
            skipped_dates: SkipSet::new(),
            is_original: true,
            original_id: None,
            description: None,
        })
    }

    pub fn income(
        amount: Decimal,
        anchor_date: NaiveDate,
        frequency: Frequency,
    ) -> Result<Self, DomainError> {
        Self::new(TransactionKind::Income, amount, anchor_date, frequency)
    }

    pub fn expense(
        amount: Decimal,
        anchor_date: NaiveDate,
        frequency: Frequency,
    ) -> Result<Self, DomainError> {
        Self::new(TransactionKind::Expense, amount, anchor_date, frequency)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_skipped_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.skipped_dates.extend(dates);
        self
    }

    /// Builds a legacy materialized copy of `template` scheduled on `date`.
    ///
    /// Such rows are only read for reconciliation; the engine never writes them.
    pub fn legacy_instance(template: &Transaction, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor_date: date,
            skipped_dates: SkipSet::new(),
            is_original: false,
            original_id: Some(template.id),
            ..template.clone()
        }
    }

    /// Starts a new series on `anchor_date`, keeping amount, kind and frequency.
    ///
    /// The anchor of an existing series never moves; editing the date yields a
    /// new identity with an empty skip set.
    pub fn rescheduled(&self, anchor_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor_date,
            skipped_dates: SkipSet::new(),
            is_original: true,
            original_id: None,
            ..self.clone()
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency.is_recurring()
    }

    /// True for rows produced by the retired bulk-materialization path.
    pub fn is_legacy_instance(&self) -> bool {
        !self.is_original
    }

    /// Records a skipped date locally. Returns false when it was already present.
    pub fn skip_date(&mut self, date: NaiveDate) -> bool {
        self.skipped_dates.insert(date)
    }

    /// Checks invariants that deserialization cannot enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(DomainError::NegativeAmount);
        }
        Ok(())
    }

    pub fn default_is_original() -> bool {
        true
    }
}
