//! cadence-domain
//!
//! Pure value types for recurring incomes and expenses: frequencies, calendar
//! stepping, reporting windows, skip sets and the transaction record itself.
//! No I/O, no logging, no storage.

pub mod calendar;
pub mod common;
pub mod error;
pub mod skip;
pub mod transaction;
pub mod window;

pub use calendar::{add_years, days_in_month, first_occurrence_on_or_after, parse_date, step};
pub use common::*;
pub use error::DomainError;
pub use skip::{SkipLookup, SkipSet};
pub use transaction::{Transaction, TransactionKind};
pub use window::{window_for, window_for_instant, DateWindow, WEEK_START};
