use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures raised while building or stepping domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid interval kind: {0}")]
    InvalidIntervalKind(String),
    #[error("Transaction amount must not be negative")]
    NegativeAmount,
    #[error("Invalid window: {start} is after {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("Date arithmetic left the supported calendar range")]
    DateOutOfRange,
}
