use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::models::StagedFile;

pub const QUEUE_FILE: &str = "queue.json";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    #[error("File \"{0}\" is already in the upload queue")]
    Duplicate(String),

    #[error("No queued file at position {0}")]
    OutOfRange(usize),
}

/// Files staged locally and not yet submitted, unique by name.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UploadQueue {
    files: Vec<StagedFile>,
}

/// What happened to each path handed to [`UploadQueue::stage_paths`].
#[derive(Debug, Default)]
pub struct StageReport {
    pub added: Vec<String>,
    pub duplicates: Vec<QueueError>,
    pub missing: Vec<PathBuf>,
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: StagedFile) -> std::result::Result<(), QueueError> {
        if self.files.iter().any(|f| f.name == file.name) {
            return Err(QueueError::Duplicate(file.name));
        }
        self.files.push(file);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> std::result::Result<StagedFile, QueueError> {
        if index >= self.files.len() {
            return Err(QueueError::OutOfRange(index));
        }
        Ok(self.files.remove(index))
    }

    pub fn list(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Stage files from disk. Anything without a `.pdf` extension is dropped
    /// without a word; duplicates and missing files are reported back.
    pub fn stage_paths(&mut self, paths: &[PathBuf]) -> StageReport {
        let mut report = StageReport::default();
        for path in paths {
            if !is_pdf(path) {
                log::debug!("Skipping non-PDF {}", path.display());
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            let resolved = match std::fs::canonicalize(path) {
                Ok(p) => p,
                Err(_) => {
                    report.missing.push(path.clone());
                    continue;
                }
            };
            match self.add(StagedFile { name: name.clone(), path: resolved }) {
                Ok(()) => report.added.push(name),
                Err(e) => report.duplicates.push(e),
            }
        }
        report
    }

    /// A missing or unreadable queue file starts an empty queue.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Error loading {}: {e}", path.display());
                return Self::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::error!("Error parsing {}: {e}", path.display());
            Self::new()
        })
    }

    /// Persist between runs; an empty queue leaves no file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.files.is_empty() {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, format!("{json}\n"))?;
        Ok(())
    }
}
