use comfy_table::{Cell, Table};

use crate::cli::{failure, open_session, paths, print_stage_report, save_queue, success};
use crate::error::Result;
use crate::queue::UploadQueue;

pub fn add(raw: &[String]) -> Result<()> {
    let (mut session, data_dir) = open_session();
    let report = session.stage(&paths(raw));
    save_queue(&session, &data_dir)?;
    print_stage_report(&report);
    if report.added.is_empty() && report.duplicates.is_empty() && report.missing.is_empty() {
        println!("No PDF files given.");
    }
    Ok(())
}

pub fn format_queue(queue: &UploadQueue) -> String {
    if queue.is_empty() {
        return "Upload queue is empty.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "File", "Path"]);
    for (i, file) in queue.list().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&file.name),
            Cell::new(file.path.display()),
        ]);
    }
    format!("Upload queue\n{table}")
}

pub fn list() -> Result<()> {
    let (session, _) = open_session();
    println!("{}", format_queue(&session.queue));
    Ok(())
}

pub fn remove(position: usize) -> Result<()> {
    let (mut session, data_dir) = open_session();
    let Some(index) = position.checked_sub(1) else {
        failure("Positions start at 1");
        return Ok(());
    };
    match session.queue.remove(index) {
        Ok(file) => {
            save_queue(&session, &data_dir)?;
            success(&format!("Removed \"{}\" from the upload queue", file.name));
        }
        Err(_) => failure(&format!("No queued file at position {position}")),
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let (mut session, data_dir) = open_session();
    session.queue.clear();
    save_queue(&session, &data_dir)?;
    success("Upload queue cleared");
    Ok(())
}
