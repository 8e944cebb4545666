//! Conversion history module
//!
//! This module contains three components:
//! - `log`: the bounded, newest-first list of records
//! - `storage`: the key-value collaborator the history is persisted through
//! - [`HistoryManager`]: owns a log and keeps its storage copy in sync

pub mod log;
pub mod storage;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use log::{HistoryLog, MAX_HISTORY_SIZE};
pub use storage::{open_store, KeyValueStore, MemoryStore, RedbStore};

use crate::core::features::unit_converter::catalog;
use crate::shared::errors::CommandResult;
use crate::shared::types::ConversionRecord;

/// Fixed storage key holding the serialized history
pub const HISTORY_STORAGE_KEY: &str = "unit_converter.history";

/// History log with persistence through an injected store
pub struct HistoryManager {
    log: HistoryLog,
    store: Arc<dyn KeyValueStore>,
}

impl HistoryManager {
    /// Load the persisted history. Never fails: a missing, unreadable or
    /// corrupt payload yields an empty log.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let log = match store.get(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => HistoryLog::new(),
            Err(e) => {
                warn!(error = %e, "failed to read history, starting empty");
                HistoryLog::new()
            }
        };

        info!(entries = log.len(), "loaded conversion history");
        Self { log, store }
    }

    /// Insert at the head and persist.
    ///
    /// The in-memory log is updated even when persisting fails; the returned
    /// error only reports lost durability.
    pub fn append(&mut self, record: ConversionRecord) -> CommandResult<()> {
        self.log.append(record);
        self.persist()
    }

    /// Empty the log and persist. A no-op when already empty.
    pub fn clear(&mut self) -> CommandResult<()> {
        if !self.log.clear() {
            debug!("history already empty");
            return Ok(());
        }
        info!("cleared conversion history");
        self.persist()
    }

    /// Write the full log to storage
    pub fn persist(&self) -> CommandResult<()> {
        let payload = serde_json::to_string(self.log.records())?;
        self.store.set(HISTORY_STORAGE_KEY, &payload).map_err(|e| {
            warn!(error = %e, "failed to persist history, keeping it in memory only");
            e
        })
    }

    pub fn records(&self) -> &[ConversionRecord] {
        self.log.records()
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }
}

fn decode(raw: &str) -> HistoryLog {
    let records: Vec<ConversionRecord> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "persisted history is malformed, starting empty");
            return HistoryLog::new();
        }
    };

    let total = records.len();
    let known: Vec<ConversionRecord> = records
        .into_iter()
        .filter(|record| {
            catalog::find_unit(record.category, &record.from_unit).is_some()
                && catalog::find_unit(record.category, &record.to_unit).is_some()
        })
        .collect();

    if known.len() < total {
        warn!(dropped = total - known.len(), "dropped history entries with unknown units");
    }
    HistoryLog::from_records(known)
}
