use crate::models::ExtractedRecord;
use crate::storage::Persistence;

/// Counts from one [`ReconciliationStore::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub added: usize,
    pub replaced: usize,
}

/// All processed records across upload batches, unique by file name.
///
/// Every mutation is mirrored to persistence; reaching empty purges the
/// persisted copy instead of writing an empty collection.
pub struct ReconciliationStore<P: Persistence> {
    records: Vec<ExtractedRecord>,
    persistence: P,
}

impl<P: Persistence> ReconciliationStore<P> {
    #[cfg(test)]
    pub fn new(persistence: P) -> Self {
        Self {
            records: Vec::new(),
            persistence,
        }
    }

    /// Load whatever a previous run persisted.
    pub fn restore(persistence: P) -> Self {
        let mut records = persistence.load().unwrap_or_default();
        dedupe_by_key(&mut records);
        if !records.is_empty() {
            log::info!("Restored {} previously processed file(s)", records.len());
        }
        Self {
            records,
            persistence,
        }
    }

    /// Same-key records are replaced where they sit; new keys are appended.
    pub fn merge(&mut self, incoming: Vec<ExtractedRecord>) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for record in incoming {
            match self.position(&record.file) {
                Some(i) => {
                    self.records[i] = record;
                    outcome.replaced += 1;
                }
                None => {
                    self.records.push(record);
                    outcome.added += 1;
                }
            }
        }
        log::info!(
            "Merged batch: {} added, {} replaced, {} total",
            outcome.added,
            outcome.replaced,
            self.records.len()
        );
        self.sync();
        outcome
    }

    /// Returns false when no record has that key.
    pub fn remove(&mut self, file: &str) -> bool {
        let Some(i) = self.position(file) else {
            return false;
        };
        self.records.remove(i);
        self.sync();
        true
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persistence.purge();
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    pub fn get(&self, file: &str) -> Option<&ExtractedRecord> {
        self.records.iter().find(|r| r.file == file)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Index of the record with this key.
    pub fn position(&self, file: &str) -> Option<usize> {
        self.records.iter().position(|r| r.file == file)
    }

    fn sync(&self) {
        if self.records.is_empty() {
            self.persistence.purge();
        } else {
            self.persistence.save(&self.records);
        }
    }
}

/// A hand-edited store file could repeat a key; keep the last copy in the
/// first copy's slot, the same result merging would have produced.
fn dedupe_by_key(records: &mut Vec<ExtractedRecord>) {
    let mut out: Vec<ExtractedRecord> = Vec::with_capacity(records.len());
    for record in records.drain(..) {
        match out.iter().position(|r| r.file == record.file) {
            Some(i) => out[i] = record,
            None => out.push(record),
        }
    }
    *records = out;
}
