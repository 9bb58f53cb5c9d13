pub mod config;
#[cfg(feature = "pdf")]
pub mod export;
pub mod init;
pub mod queue;
pub mod remove;
pub mod results;
pub mod status;
pub mod submit;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use crate::error::Result;
use crate::queue::{StageReport, UploadQueue, QUEUE_FILE};
use crate::session::Session;
use crate::settings::get_data_dir;
use crate::storage::JsonFileStorage;
use crate::store::ReconciliationStore;

#[derive(Parser)]
#[command(
    name = "cardstmt",
    about = "Extract credit card statement summaries from PDFs and export them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up cardstmt: choose a data directory and extraction endpoint.
    Init {
        /// Path for cardstmt data (default: ~/Documents/cardstmt)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Extraction service URL
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Show data locations, queue size and processed statement counts.
    Status,
    /// Manage the upload queue.
    Queue {
        #[command(subcommand)]
        command: QueueCommands,
    },
    /// Send every queued PDF to the extraction service and merge the results.
    Submit {
        /// PDFs to queue before submitting
        paths: Vec<String>,
    },
    /// Show processed statements.
    Results {
        /// Print the results view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove one processed statement by file name.
    Remove {
        /// File name as shown in `cardstmt results`
        file: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Clear the upload queue and every saved result.
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Export statement summaries to PDF.
    #[cfg(feature = "pdf")]
    Export {
        /// File name of the statement to export
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        file: Option<String>,
        /// Export every statement into one document
        #[arg(long)]
        all: bool,
        /// With --all, write a CSV of the extracted fields instead
        #[arg(long, requires = "all")]
        csv: bool,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum QueueCommands {
    /// Stage PDF files for the next submit. Non-PDF files are ignored.
    Add {
        /// Paths to PDF statements
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// List staged files.
    List,
    /// Remove a staged file by its position in `cardstmt queue list`.
    Remove {
        /// 1-based position
        position: usize,
    },
    /// Remove every staged file.
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print current settings.
    Show,
    /// Set the extraction service URL.
    SetEndpoint {
        /// e.g. http://127.0.0.1:5000/api/extract-multiple
        url: String,
    },
    /// Set the request timeout in seconds, or `off` to wait indefinitely.
    SetTimeout {
        value: String,
    },
}

/// Queue and store for this run, both loaded from the data directory.
pub(crate) fn open_session() -> (Session<JsonFileStorage>, PathBuf) {
    let data_dir = get_data_dir();
    let queue = UploadQueue::load(&data_dir.join(QUEUE_FILE));
    let store = ReconciliationStore::restore(JsonFileStorage::new(&data_dir));
    (Session::new(queue, store), data_dir)
}

pub(crate) fn save_queue(session: &Session<JsonFileStorage>, data_dir: &Path) -> Result<()> {
    session.queue.save(&data_dir.join(QUEUE_FILE))
}

pub(crate) fn confirm(prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

pub(crate) fn success(msg: &str) {
    println!("{}", msg.green());
}

pub(crate) fn failure(msg: &str) {
    eprintln!("{}", msg.red());
}

pub(crate) fn paths(raw: &[String]) -> Vec<PathBuf> {
    raw.iter().map(PathBuf::from).collect()
}

pub(crate) fn print_stage_report(report: &StageReport) {
    for dup in &report.duplicates {
        failure(&dup.to_string());
    }
    for path in &report.missing {
        failure(&format!("File not found: {}", path.display()));
    }
    if !report.added.is_empty() {
        println!("Queued {} file(s)", report.added.len());
    }
}
