use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{
    load_settings, save_settings, settings_path, shellexpand_path, validate_endpoint, Settings,
};

pub fn run(data_dir: Option<String>, endpoint: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    let defaults = Settings::default();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_path().exists() && settings.data_dir == defaults.data_dir {
        // First run: prompt for data dir
        let default = &settings.data_dir;
        println!("Data directory [{}]: ", default);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    if let Some(url) = endpoint {
        validate_endpoint(&url)?;
        settings.endpoint = url.trim().to_string();
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    println!("Initialized cardstmt at {}", resolved.display());
    println!("Extraction endpoint: {}", settings.endpoint);
    Ok(())
}
