use crate::error::{CardstmtError, Result};
use crate::settings::{load_settings, save_settings, settings_path, validate_endpoint, ENDPOINT_ENV};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:   {}", settings_path().display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    if std::env::var(ENDPOINT_ENV).is_ok() {
        println!("{ENDPOINT_ENV} overrides endpoint: {}", settings.effective_endpoint());
    }
    Ok(())
}

pub fn set_endpoint(url: &str) -> Result<()> {
    validate_endpoint(url)?;
    let mut settings = load_settings();
    settings.endpoint = url.trim().to_string();
    save_settings(&settings)?;
    println!("Endpoint set to {}", settings.endpoint);
    Ok(())
}

/// Parse a timeout argument: seconds, or `off`/`none` for no timeout.
pub fn parse_timeout(value: &str) -> Result<Option<u64>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "none" | "0" => Ok(None),
        v => v
            .parse::<u64>()
            .map(Some)
            .map_err(|_| CardstmtError::Settings(format!("invalid timeout \"{value}\""))),
    }
}

pub fn set_timeout(value: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.timeout_secs = parse_timeout(value)?;
    save_settings(&settings)?;
    match settings.timeout_secs {
        Some(s) => println!("Request timeout set to {s}s"),
        None => println!("Request timeout disabled"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Some(30));
        assert_eq!(parse_timeout("off").unwrap(), None);
        assert_eq!(parse_timeout("NONE").unwrap(), None);
        assert_eq!(parse_timeout("0").unwrap(), None);
        assert!(parse_timeout("soon").is_err());
    }
}
