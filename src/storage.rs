//! Persisted mirror of the processed records.
//!
//! One JSON array under one key. Failures are logged and swallowed: the
//! in-memory store stays authoritative for the rest of the run.

use std::path::{Path, PathBuf};

use crate::models::ExtractedRecord;

pub const STORAGE_KEY: &str = "extracted_data.json";

pub trait Persistence {
    /// `None` when nothing was persisted or the stored data is unreadable.
    fn load(&self) -> Option<Vec<ExtractedRecord>>;
    fn save(&self, records: &[ExtractedRecord]);
    fn purge(&self);
}

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORAGE_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Persistence for JsonFileStorage {
    fn load(&self) -> Option<Vec<ExtractedRecord>> {
        if !self.path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Error loading {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => Some(records),
            Err(e) => {
                log::error!("Error parsing {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&self, records: &[ExtractedRecord]) {
        if records.is_empty() {
            return;
        }
        let json = match serde_json::to_string_pretty(records) {
            Ok(j) => j,
            Err(e) => {
                log::error!("Error serializing records: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Error creating {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, format!("{json}\n")) {
            log::error!("Error saving to {}: {e}", self.path.display());
        }
    }

    fn purge(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::error!("Error removing {}: {e}", self.path.display()),
        }
    }
}

/// In-memory persistence holding the serialized form, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    pub slot: std::cell::RefCell<Option<String>>,
    pub fail_writes: bool,
    pub writes: std::cell::Cell<usize>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn is_present(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

#[cfg(test)]
impl Persistence for MemoryStorage {
    fn load(&self) -> Option<Vec<ExtractedRecord>> {
        let slot = self.slot.borrow();
        serde_json::from_str(slot.as_deref()?).ok()
    }

    fn save(&self, records: &[ExtractedRecord]) {
        if records.is_empty() {
            return;
        }
        self.writes.set(self.writes.get() + 1);
        if self.fail_writes {
            log::error!("Error saving records: quota exceeded");
            return;
        }
        *self.slot.borrow_mut() = serde_json::to_string(records).ok();
    }

    fn purge(&self) {
        *self.slot.borrow_mut() = None;
    }
}
