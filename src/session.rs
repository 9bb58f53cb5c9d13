use std::path::PathBuf;

use thiserror::Error;

use crate::client::{ClientError, Extractor};
use crate::queue::{StageReport, UploadQueue};
use crate::store::ReconciliationStore;
use crate::storage::Persistence;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please select at least one PDF file")]
    NoFiles,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("No processed statement named \"{0}\"")]
    UnknownRecord(String),

    #[error("Cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub processed: usize,
    pub total: usize,
}

impl SubmitOutcome {
    pub fn message(&self) -> String {
        format!(
            "\u{2713} Successfully processed {} file(s). Total: {} file(s)",
            self.processed, self.total
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub remaining: usize,
}

/// The upload queue and the record store for one run of the client.
pub struct Session<P: Persistence> {
    pub queue: UploadQueue,
    pub store: ReconciliationStore<P>,
}

impl<P: Persistence> Session<P> {
    pub fn new(queue: UploadQueue, store: ReconciliationStore<P>) -> Self {
        Self { queue, store }
    }

    pub fn stage(&mut self, paths: &[PathBuf]) -> StageReport {
        self.queue.stage_paths(paths)
    }

    /// Send every queued file in one request. Queue and store change only
    /// after a fully successful response.
    pub fn submit(&mut self, extractor: &dyn Extractor) -> Result<SubmitOutcome, SessionError> {
        if self.queue.is_empty() {
            return Err(SessionError::NoFiles);
        }
        let batch = extractor.extract(self.queue.list())?;
        self.store.merge(batch.records);
        self.queue.clear();
        Ok(SubmitOutcome {
            processed: batch.count,
            total: self.store.len(),
        })
    }

    /// Callers that prompt should check the key exists first.
    pub fn remove_record(&mut self, file: &str, confirmed: bool) -> Result<RemoveOutcome, SessionError> {
        if !confirmed {
            return Err(SessionError::Cancelled);
        }
        if !self.store.remove(file) {
            return Err(SessionError::UnknownRecord(file.to_string()));
        }
        Ok(RemoveOutcome {
            remaining: self.store.len(),
        })
    }

    pub fn reset(&mut self, confirmed: bool) -> Result<(), SessionError> {
        if !confirmed {
            return Err(SessionError::Cancelled);
        }
        self.queue.clear();
        self.store.clear();
        Ok(())
    }
}

impl RemoveOutcome {
    pub fn message(&self, file: &str) -> String {
        if self.remaining > 0 {
            format!("Removed \"{file}\"")
        } else {
            "All results cleared".to_string()
        }
    }
}
