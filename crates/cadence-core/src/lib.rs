//! cadence-core
//!
//! Recurrence resolution and interval aggregation over cadence-domain records.
//! Depends on cadence-domain. No terminal I/O; persistence goes through the
//! [`storage::TransactionStore`] collaborator.

pub mod aggregator;
pub mod error;
pub mod expander;
pub mod legacy;
pub mod listing;
pub mod public_api;
pub mod resolver;
pub mod skip_registry;
pub mod storage;
pub mod time;

pub use aggregator::{progress_percent, IntervalAggregator, IntervalProgress, IntervalTotals};
pub use error::CoreError;
pub use expander::{expand, expand_occurrences, Occurrence, Occurrences};
pub use legacy::reconcile_legacy;
pub use listing::{annotate_next, TransactionListing};
pub use resolver::NextOccurrenceResolver;
pub use skip_registry::SkipRegistry;
pub use storage::{transaction_warnings, InMemoryTransactionStore, TransactionStore};
pub use time::{Clock, FixedClock, SystemClock};

/// Lookahead used when no horizon is configured.
pub const DEFAULT_HORIZON_YEARS: u32 = 5;
