use crate::cli::{open_session, paths, print_stage_report, save_queue, success};
use crate::client::HttpExtractor;
use crate::error::Result;
use crate::settings::load_settings;

pub fn run(raw: &[String]) -> Result<()> {
    let (mut session, data_dir) = open_session();
    if !raw.is_empty() {
        let report = session.stage(&paths(raw));
        print_stage_report(&report);
        save_queue(&session, &data_dir)?;
    }

    let settings = load_settings();
    let extractor = HttpExtractor::new(&settings.effective_endpoint(), settings.timeout())?;

    if !session.queue.is_empty() {
        eprintln!(
            "Processing {} file(s) via {}...",
            session.queue.len(),
            extractor.endpoint()
        );
    }
    // Queue and store are untouched on any error, so nothing to save then.
    let outcome = session.submit(&extractor)?;
    save_queue(&session, &data_dir)?;
    success(&outcome.message());
    Ok(())
}
