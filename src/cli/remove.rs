use crate::cli::{confirm, open_session, save_queue, success};
use crate::error::Result;
use crate::session::SessionError;

pub fn run(file: &str, yes: bool) -> Result<()> {
    let (mut session, _) = open_session();
    if session.store.get(file).is_none() {
        return Err(SessionError::UnknownRecord(file.to_string()).into());
    }
    let confirmed = confirm(&format!("Remove \"{file}\" from results?"), yes);
    match session.remove_record(file, confirmed) {
        Ok(outcome) => success(&outcome.message(file)),
        Err(SessionError::Cancelled) => println!("Cancelled."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub fn reset(yes: bool) -> Result<()> {
    let (mut session, data_dir) = open_session();
    let confirmed = confirm(
        "Are you sure you want to clear all data? This will remove saved results.",
        yes,
    );
    match session.reset(confirmed) {
        Ok(()) => {
            save_queue(&session, &data_dir)?;
            success("All data cleared");
        }
        Err(SessionError::Cancelled) => println!("Cancelled."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
