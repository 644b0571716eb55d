//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use newshub_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "api_url": config.api_url,
                    "country": config.country,
                    "request_timeout_secs": config.request_timeout_secs,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:             {}", config.data_dir.display());
            println!("  api_url:              {}", config.api_url);
            println!("  country:              {}", config.country);
            println!("  request_timeout_secs: {}", config.request_timeout_secs);
            println!(
                "  log_file:             {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Bookmarks:   {}", config.bookmarks_path().display());
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "api_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                bail!("api_url must start with http:// or https://");
            }
            config.api_url = value.trim_end_matches('/').to_string();
        }
        "country" => {
            if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("country must be a two-letter code, e.g. 'us'");
            }
            config.country = value.to_lowercase();
        }
        "request_timeout_secs" => {
            config.request_timeout_secs = value
                .parse()
                .context("Invalid value for request_timeout_secs. Use a whole number of seconds.")?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, api_url, country, request_timeout_secs, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();
        apply(&mut config, "country", "GB").unwrap();
        apply(&mut config, "api_url", "https://news.example/").unwrap();
        apply(&mut config, "request_timeout_secs", "5").unwrap();
        apply(&mut config, "log_file", "/tmp/newshub.log").unwrap();

        assert_eq!(config.country, "gb");
        assert_eq!(config.api_url, "https://news.example");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/newshub.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "country", "usa").is_err());
        assert!(apply(&mut config, "api_url", "localhost:8080").is_err());
        assert!(apply(&mut config, "request_timeout_secs", "soon").is_err());
        assert!(apply(&mut config, "sync_url", "x").is_err());
    }

    #[test]
    fn test_set_writes_cli_path() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let data_dir = temp_dir.path().join("data");
        std::fs::write(&path, format!("data_dir = '{}'\n", data_dir.display())).unwrap();

        let output = Output::new(OutputFormat::Quiet);
        set("country".to_string(), "de".to_string(), Some(&path), &output).unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert_eq!(saved.country, "de");
        assert_eq!(saved.data_dir, data_dir);
    }
}
