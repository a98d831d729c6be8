//! cadence-storage-json
//!
//! Filesystem-backed JSON implementation of the transaction store.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use cadence_core::{CoreError, TransactionStore};
use cadence_domain::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

const CURRENT_SCHEMA_VERSION: u8 = 1;
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    #[serde(default = "StoreDocument::schema_version_default")]
    schema_version: u8,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl StoreDocument {
    fn empty() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
        }
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Keeps every transaction in one pretty-printed JSON document.
///
/// Writes replace the file atomically (temporary file, then rename). Each store
/// value holds its own lock, so read-modify-write cycles are serialized only
/// among callers sharing that value; separate stores on one path are not.
#[derive(Debug)]
pub struct JsonTransactionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonTransactionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument, CoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument::empty());
        }
        let data = fs::read_to_string(&self.path)?;
        let document: StoreDocument = serde_json::from_str(&data)?;
        for txn in &document.transactions {
            txn.validate()?;
        }
        Ok(document)
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(document)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), records = document.transactions.len(), "store written");
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, CoreError> {
        self.lock
            .lock()
            .map_err(|_| CoreError::Storage("json store lock poisoned".into()))
    }
}

impl TransactionStore for JsonTransactionStore {
    fn list(&self) -> Result<Vec<Transaction>, CoreError> {
        let _guard = self.guard()?;
        Ok(self.read_document()?.transactions)
    }

    fn load(&self, id: Uuid) -> Result<Transaction, CoreError> {
        let _guard = self.guard()?;
        self.read_document()?
            .transactions
            .into_iter()
            .find(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))
    }

    fn save(&self, transaction: &Transaction) -> Result<(), CoreError> {
        transaction.validate()?;
        let _guard = self.guard()?;
        let mut document = self.read_document()?;
        match document
            .transactions
            .iter_mut()
            .find(|txn| txn.id == transaction.id)
        {
            Some(existing) => *existing = transaction.clone(),
            None => document.transactions.push(transaction.clone()),
        }
        self.write_document(&document)?;
        info!(transaction = %transaction.id, "transaction saved");
        Ok(())
    }

    fn append_skipped_date(&self, id: Uuid, date: NaiveDate) -> Result<bool, CoreError> {
        let _guard = self.guard()?;
        let mut document = self.read_document()?;
        let txn = document
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        if !txn.skip_date(date) {
            return Ok(false);
        }
        self.write_document(&document)?;
        Ok(true)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
