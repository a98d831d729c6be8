#![doc(test(attr(deny(warnings))))]

//! Cadence resolves recurring incomes and expenses without materializing future
//! rows: the next occurrence of a series, the occurrences inside a calendar
//! window, and the totals those occurrences add up to.

pub mod errors;
pub mod service;
pub mod utils;

pub use cadence_config::{ConfigError, ConfigManager, EngineConfig};
pub use cadence_core::{
    annotate_next, expand, expand_occurrences, progress_percent, public_api, reconcile_legacy,
    transaction_warnings, Clock, CoreError, FixedClock, InMemoryTransactionStore,
    IntervalAggregator, IntervalProgress, IntervalTotals, NextOccurrenceResolver, Occurrence,
    Occurrences, SkipRegistry, SystemClock, TransactionListing, TransactionStore,
    DEFAULT_HORIZON_YEARS,
};
pub use cadence_domain::{
    step, window_for, DateWindow, DomainError, Frequency, IntervalKind, SkipLookup, SkipSet,
    Transaction, TransactionKind,
};
pub use cadence_storage_json::JsonTransactionStore;
pub use errors::CadenceError;
pub use service::Cadence;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default `cadence=info` directive.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing with the directives from [`EngineConfig::log_filter`].
pub fn init_with_config(config: &EngineConfig) {
    init_with_filter(config.log_filter.as_deref());
}

/// Initializes global tracing, adding comma-separated `filter` directives.
/// Only the first call has any effect.
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Cadence tracing initialized.");
    });
}
