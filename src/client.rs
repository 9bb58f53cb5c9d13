//! Extraction service client.
//!
//! Blocking reqwest client. All staged files go out in one multipart request
//! and come back as one JSON envelope; nothing is merged until it resolves.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{ExtractedRecord, StagedFile};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/extract-multiple";
pub const FILES_FIELD: &str = "files";
const GENERIC_FAILURE: &str = "Error processing files";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Network failure, unreadable body, or a staged file that can't be read.
    #[error("Error uploading files: {0}")]
    Transport(String),

    /// The service answered with `success: false`.
    #[error("{0}")]
    Server(String),
}

/// Response body of the extraction endpoint.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ExtractedRecord>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionBatch {
    pub records: Vec<ExtractedRecord>,
    pub count: usize,
}

impl ResponseEnvelope {
    pub fn into_batch(self) -> Result<ExtractionBatch, ClientError> {
        if !self.success {
            let msg = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(ClientError::Server(msg));
        }
        let count = self.count.unwrap_or(self.data.len());
        Ok(ExtractionBatch {
            records: self.data,
            count,
        })
    }
}

pub fn parse_envelope(body: &str) -> Result<ExtractionBatch, ClientError> {
    let envelope: ResponseEnvelope =
        serde_json::from_str(body).map_err(|e| ClientError::Transport(e.to_string()))?;
    envelope.into_batch()
}

pub trait Extractor {
    fn extract(&self, files: &[StagedFile]) -> Result<ExtractionBatch, ClientError>;
}

pub struct HttpExtractor {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpExtractor {
    /// `timeout: None` waits as long as the service takes.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("cardstmt/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(files: &[StagedFile]) -> Result<reqwest::blocking::multipart::Form, ClientError> {
        let mut form = reqwest::blocking::multipart::Form::new();
        for file in files {
            let bytes = std::fs::read(&file.path).map_err(|e| {
                ClientError::Transport(format!("could not read {}: {e}", file.path.display()))
            })?;
            let part = reqwest::blocking::multipart::Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str("application/pdf")
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }
}

impl Extractor for HttpExtractor {
    fn extract(&self, files: &[StagedFile]) -> Result<ExtractionBatch, ClientError> {
        let form = Self::build_form(files)?;
        log::info!("Submitting {} file(s) to {}", files.len(), self.endpoint);

        let resp = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        log::debug!("Extraction service answered HTTP {}", status.as_u16());

        parse_envelope(&body)
    }
}
