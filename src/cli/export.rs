use std::path::{Path, PathBuf};

use crate::cli::{open_session, success};
use crate::error::Result;
use crate::fmt::{combined_file_name, single_file_name};
use crate::models::{
    ExtractedRecord, CASH_LIMIT, CREDIT_LIMIT, DUE_DATE, REWARD_POINTS, TOTAL_OUTSTANDING,
};
use crate::session::SessionError;

fn default_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join("exports").join(name)
}

fn write_file(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn one(file: &str, output: Option<String>) -> Result<()> {
    let (session, data_dir) = open_session();
    let index = session
        .store
        .position(file)
        .ok_or_else(|| SessionError::UnknownRecord(file.to_string()))?;
    let record = &session.store.records()[index];
    let bytes = crate::pdf::render_one(record, index, chrono::Utc::now())?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(&data_dir, &single_file_name(&record.file, index)));
    write_file(&bytes, &path)?;
    success(&format!("\u{2713} PDF downloaded: {}", file_label(&path)));
    Ok(())
}

pub fn all(output: Option<String>, as_csv: bool) -> Result<()> {
    let (session, data_dir) = open_session();
    let records = session.store.records();
    if records.is_empty() {
        return Err(crate::error::CardstmtError::Other(
            "No processed statements to export".into(),
        ));
    }
    let now = chrono::Utc::now();
    let ext = if as_csv { "csv" } else { "pdf" };
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(&data_dir, &combined_file_name(now, ext)));

    if as_csv {
        write_file(&records_csv(records)?, &path)?;
        success(&format!(
            "\u{2713} CSV downloaded with {} statement(s)",
            records.len()
        ));
    } else {
        write_file(&crate::pdf::render_all(records, now)?, &path)?;
        success(&format!(
            "\u{2713} Combined PDF downloaded with {} statement(s)",
            records.len()
        ));
    }
    Ok(())
}

/// One row per statement; missing fields are left empty.
pub fn records_csv(records: &[ExtractedRecord]) -> Result<Vec<u8>> {
    let columns = [CREDIT_LIMIT, CASH_LIMIT, DUE_DATE, TOTAL_OUTSTANDING, REWARD_POINTS];
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header = vec!["File", "Bank"];
    header.extend(columns);
    wtr.write_record(&header)?;
    for r in records {
        let mut row = vec![r.file.clone(), r.bank_tag().to_string()];
        row.extend(columns.iter().map(|k| r.field(k).unwrap_or_default()));
        wtr.write_record(&row)?;
    }
    wtr.into_inner()
        .map_err(|e| crate::error::CardstmtError::Other(e.to_string()))
}
