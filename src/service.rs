//! Application facade wiring configuration, persistence and the engine.

use std::path::PathBuf;

use cadence_config::{ConfigManager, EngineConfig};
use cadence_core::{
    annotate_next, expand_occurrences, transaction_warnings, Clock, IntervalAggregator,
    IntervalProgress, IntervalTotals, NextOccurrenceResolver, Occurrence, SkipRegistry,
    SystemClock, TransactionListing, TransactionStore,
};
use cadence_domain::{window_for, DateWindow, IntervalKind, Transaction, TransactionKind};
use cadence_storage_json::JsonTransactionStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{init_with_config, CadenceError};

/// Answers listing, next-recurrence and interval questions for one store.
///
/// Every read goes through the persistence collaborator, so results always
/// reflect the latest skipped dates.
pub struct Cadence<S = JsonTransactionStore, C = SystemClock> {
    config: EngineConfig,
    store: S,
    clock: C,
}

impl Cadence<JsonTransactionStore, SystemClock> {
    /// Opens `<base>/config/config.json` and the JSON store it points at.
    ///
    /// Transactions live in the configured data root, or directly under `base`
    /// when none is set. Installs tracing with the configured filter on first use.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, CadenceError> {
        let base = base.into();
        let manager = ConfigManager::with_base_dir(base.clone())?;
        let config = manager.load()?;
        init_with_config(&config);
        info!(
            path = %manager.config_path().display(),
            horizon_years = config.horizon_years,
            "configuration loaded"
        );
        let store = JsonTransactionStore::open(config.transactions_path_in(&base))?;
        Self::new(config, store, SystemClock)
    }

    /// Opens the per-user location resolved from the platform directories.
    pub fn open_default() -> Result<Self, CadenceError> {
        Self::open(EngineConfig::default().resolve_data_root())
    }
}

impl<S: TransactionStore, C: Clock> Cadence<S, C> {
    pub fn new(config: EngineConfig, store: S, clock: C) -> Result<Self, CadenceError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            clock,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn resolver(&self) -> NextOccurrenceResolver {
        NextOccurrenceResolver::new(self.config.horizon_years)
    }

    pub fn aggregator(&self) -> IntervalAggregator {
        IntervalAggregator::new(self.config.horizon_years)
    }

    /// Validates and persists `transaction`, replacing any record with the same id.
    pub fn record(&self, transaction: Transaction) -> Result<Uuid, CadenceError> {
        self.store.save(&transaction)?;
        info!(transaction = %transaction.id, frequency = %transaction.frequency, "transaction recorded");
        Ok(transaction.id)
    }

    /// Stored rows with their next recurrence after today.
    pub fn listing(&self) -> Result<Vec<TransactionListing>, CadenceError> {
        let transactions = self.store.list()?;
        for warning in transaction_warnings(&transactions) {
            warn!("{}", warning);
        }
        Ok(annotate_next(&self.resolver(), &transactions, self.today())?)
    }

    /// Next recurrence of one stored series after today.
    pub fn next_recurrence(&self, id: Uuid) -> Result<Option<NaiveDate>, CadenceError> {
        let transaction = self.store.load(id)?;
        Ok(self
            .resolver()
            .next_occurrence_of(&transaction, self.today())?)
    }

    /// Window of `interval` (or the configured default) containing today.
    pub fn current_window(&self, interval: Option<IntervalKind>) -> Result<DateWindow, CadenceError> {
        let kind = interval.unwrap_or(self.config.default_interval);
        Ok(window_for(kind, self.today())?)
    }

    /// Income and expense totals inside `window`.
    pub fn totals(&self, window: DateWindow) -> Result<IntervalTotals, CadenceError> {
        let transactions = self.store.list()?;
        let totals = self.aggregator().totals_by_kind(&transactions, window)?;
        debug!(%window, income = %totals.income, expense = %totals.expense, "window totals");
        Ok(totals)
    }

    /// Budget (expense) or goal (income) progress for the current `interval` window.
    pub fn progress(
        &self,
        kind: TransactionKind,
        interval: Option<IntervalKind>,
        target: Decimal,
    ) -> Result<IntervalProgress, CadenceError> {
        let window = self.current_window(interval)?;
        let transactions = self.store.list()?;
        Ok(self
            .aggregator()
            .progress(&transactions, kind, window, target)?)
    }

    /// Every virtual occurrence inside `window`, ordered by date.
    pub fn occurrences(&self, window: DateWindow) -> Result<Vec<Occurrence>, CadenceError> {
        let transactions = self.store.list()?;
        Ok(expand_occurrences(
            &transactions,
            window,
            self.config.horizon_years,
        )?)
    }

    /// Skips one occurrence of a stored recurring series.
    pub fn skip_occurrence(&self, id: Uuid, date: NaiveDate) -> Result<bool, CadenceError> {
        Ok(SkipRegistry::new(&self.store, id).add(date)?)
    }
}
