use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use redb::{Database, TableDefinition};
use tracing::{info, warn};

use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::settings::AppSettings;

const DATABASE_FILE: &str = "history.redb";

/// Redb table definition for the key-value store
/// Key: storage key, Value: serialized payload
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// Durable key-value storage collaborator used for history persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CommandResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CommandResult<()>;
}

/// Redb-based storage implementation
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database inside `data_dir`
    pub fn open(data_dir: &Path) -> CommandResult<Self> {
        std::fs::create_dir_all(data_dir)?;

        let db = Database::create(data_dir.join(DATABASE_FILE))?;

        // Initialize table so read transactions never see it missing
        let write_txn = db.begin_write()?;
        {
            let _table = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> CommandResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> CommandResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-memory fallback storage (used if the database cannot be opened)
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CommandResult<Option<String>> {
        let entries = self.entries.lock()
            .map_err(|e| CommandError::StorageFailure(format!("Mutex poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CommandResult<()> {
        let mut entries = self.entries.lock()
            .map_err(|e| CommandError::StorageFailure(format!("Mutex poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the durable store configured by `settings`, falling back to memory
pub fn open_store(settings: &AppSettings) -> Arc<dyn KeyValueStore> {
    let opened = settings.data_dir().and_then(|dir| {
        let store = RedbStore::open(&dir)?;
        info!(path = %dir.join(DATABASE_FILE).display(), "opened history database");
        Ok(store)
    });

    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "failed to open history database, history will not survive this session");
            Arc::new(MemoryStore::new())
        }
    }
}
