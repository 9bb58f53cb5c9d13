use crate::cli::open_session;
use crate::error::Result;
use crate::settings::load_settings;
use crate::view::project;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let (session, data_dir) = open_session();
    let storage = session.store.persistence();

    println!("Data dir:   {}", data_dir.display());
    println!("Results:    {}", storage.path().display());
    println!("Endpoint:   {}", settings.effective_endpoint());
    println!(
        "Timeout:    {}",
        settings
            .timeout_secs
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "none".to_string())
    );

    println!();
    println!("Queued:     {}", session.queue.len());
    println!("Processed:  {}", session.store.len());
    if !session.store.is_empty() {
        println!("By bank:    {}", project(session.store.records()).summary_line);
    }
    println!("Saved:      {}", if storage.exists() { "yes" } else { "no" });
    Ok(())
}
