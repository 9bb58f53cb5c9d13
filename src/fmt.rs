use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Kolkata;

/// Generation stamp as shown on exported statements, e.g. `18/10/2026, 3:45:12 pm` (IST).
pub fn ist_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Kolkata)
        .format("%d/%m/%Y, %-I:%M:%S %P")
        .to_string()
}

/// `Rs. 50,000`
pub fn rupees(val: &str) -> String {
    format!("Rs. {val}")
}

/// Name shown for a statement; untitled ones are numbered by position.
pub fn document_name(file: &str, index: usize) -> String {
    if file.is_empty() {
        format!("Statement_{}", index + 1)
    } else {
        file.to_string()
    }
}

/// `Jan.pdf` -> `Jan_statement.pdf`. Only the last path component of the
/// key is kept, so the name never points outside the export directory.
pub fn single_file_name(file: &str, index: usize) -> String {
    let base = Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let base = document_name(base, index);
    let stem = base.strip_suffix(".pdf").unwrap_or(&base);
    format!("{stem}_statement.pdf")
}

/// `all_statements_2026-10-18.pdf`, dated in UTC.
pub fn combined_file_name(at: DateTime<Utc>, ext: &str) -> String {
    format!("all_statements_{}.{ext}", at.format("%Y-%m-%d"))
}
