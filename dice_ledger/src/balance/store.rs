//! Persistence surfaces for the client-side balance cache.

use super::errors::{StoreError, StoreResult};
use crate::wager::{BALANCE_KEY, Balance};
use serde_json::{Map, Value};
use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Durable cache of the last known balance.
///
/// A dumb key-value surface: it performs no validation and makes no trust
/// decisions. `save` must have completed by the time it returns.
pub trait BalanceStore: Send + Sync {
    /// Read the last persisted balance, `None` on first run
    fn load(&self) -> StoreResult<Option<Balance>>;

    /// Persist `balance`
    fn save(&self, balance: Balance) -> StoreResult<()>;
}

/// Balance store backed by a JSON object file.
///
/// The file maps keys to string values, so other entries written by the same
/// client survive a save. Writes go through a sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileBalanceStore {
    path: PathBuf,
    key: String,
}

impl FileBalanceStore {
    /// Store keyed by [`BALANCE_KEY`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, BALANCE_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn read_map(&self) -> StoreResult<Option<Map<String, Value>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(Some(map)),
            other => Err(StoreError::Corrupt(format!(
                "expected a JSON object in {}, found {other}",
                self.path.display()
            ))),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BalanceStore for FileBalanceStore {
    fn load(&self) -> StoreResult<Option<Balance>> {
        let Some(map) = self.read_map()? else {
            return Ok(None);
        };

        match map.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| StoreError::Corrupt(format!("{}={s:?}", self.key))),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| StoreError::Corrupt(format!("{}={n}", self.key))),
            Some(other) => Err(StoreError::Corrupt(format!("{}={other}", self.key))),
        }
    }

    fn save(&self, balance: Balance) -> StoreResult<()> {
        // An unreadable file is replaced rather than blocking every future save.
        let mut map = match self.read_map() {
            Ok(map) => map.unwrap_or_default(),
            Err(StoreError::Io(e)) => return Err(StoreError::Io(e)),
            Err(e) => {
                log::warn!("Discarding unreadable balance store {}: {e}", self.path.display());
                Map::new()
            }
        };
        map.insert(self.key.clone(), Value::String(balance.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, serde_json::to_vec_pretty(&Value::Object(map))?)?;
        fs::rename(&tmp, &self.path)?;

        log::debug!("Persisted balance {balance} to {}", self.path.display());
        Ok(())
    }
}

/// In-memory balance store.
///
/// Clones share the same slot, which lets tests keep a handle on what the
/// engine persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBalanceStore {
    slot: Arc<Mutex<Option<Balance>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `balance`
    pub fn with_balance(balance: Balance) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(balance))),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl BalanceStore for MemoryBalanceStore {
    fn load(&self) -> StoreResult<Option<Balance>> {
        self.slot
            .lock()
            .map(|slot| *slot)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn save(&self, balance: Balance) -> StoreResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        *slot = Some(balance);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("dice_ledger_store_{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_file_store_absent_on_first_run() {
        let store = FileBalanceStore::new(scratch_path("balance.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = scratch_path("balance.json");
        FileBalanceStore::new(&path).save(1300).unwrap();

        let reopened = FileBalanceStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(1300));
        assert!(!reopened.temp_path().exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let path = scratch_path("balance.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme": "dark", "diceGameBalance": "10"}"#).unwrap();

        let store = FileBalanceStore::new(&path);
        assert_eq!(store.load().unwrap(), Some(10));
        store.save(0).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["diceGameBalance"], "0");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_reports_corrupt_value() {
        let path = scratch_path("balance.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"diceGameBalance": "NaN"}"#).unwrap();

        let store = FileBalanceStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));

        // Saving over a corrupt value repairs it.
        store.save(42).unwrap();
        assert_eq!(store.load().unwrap(), Some(42));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_accepts_numeric_value() {
        let path = scratch_path("balance.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"diceGameBalance": 750}"#).unwrap();

        assert_eq!(FileBalanceStore::new(&path).load().unwrap(), Some(750));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_memory_store_shares_slot() {
        let store = MemoryBalanceStore::new();
        let handle = store.clone();

        assert_eq!(store.load().unwrap(), None);
        store.save(500).unwrap();

        assert_eq!(handle.load().unwrap(), Some(500));
        assert_eq!(handle.save_count(), 1);
    }
}
