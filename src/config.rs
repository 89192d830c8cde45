//! Configuration loading and resolution
//!
//! Per-setting priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (folded into the CLI layer by clap)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default listen port
pub const DEFAULT_PORT: u16 = 5720;

/// Deployed detection endpoint
pub const DEFAULT_DETECT_URL: &str =
    "https://2kydru7c5e.execute-api.us-east-1.amazonaws.com/dev/detect-emotion";

/// Deployed playlist endpoint
pub const DEFAULT_PLAYLIST_URL: &str =
    "https://2kydru7c5e.execute-api.us-east-1.amazonaws.com/dev/get-playlist";

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (loopback only)
    pub port: u16,
    /// Emotion detection endpoint URL
    pub detect_url: String,
    /// Playlist endpoint URL
    pub playlist_url: String,
}

/// Optional keys of the TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    port: Option<u16>,
    detect_url: Option<String>,
    playlist_url: Option<String>,
}

impl Config {
    /// Resolve settings from CLI/env values, the config file, and
    /// defaults, in that order.
    ///
    /// clap already applies the environment-variable fallback to each CLI
    /// flag, so the `cli_*` arguments fold priorities 1 and 2 together.
    pub fn resolve(
        cli_port: Option<u16>,
        cli_detect_url: Option<String>,
        cli_playlist_url: Option<String>,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let file = load_config_file(config_path)?;
        Ok(merge(cli_port, cli_detect_url, cli_playlist_url, file))
    }
}

impl Default for Config {
    fn default() -> Self {
        merge(None, None, None, ConfigFile::default())
    }
}

fn merge(
    cli_port: Option<u16>,
    cli_detect_url: Option<String>,
    cli_playlist_url: Option<String>,
    file: ConfigFile,
) -> Config {
    Config {
        port: cli_port.or(file.port).unwrap_or(DEFAULT_PORT),
        detect_url: cli_detect_url
            .or(file.detect_url)
            .unwrap_or_else(|| DEFAULT_DETECT_URL.to_string()),
        playlist_url: cli_playlist_url
            .or(file.playlist_url)
            .unwrap_or_else(|| DEFAULT_PLAYLIST_URL.to_string()),
    }
}

/// Read the TOML config file if one exists.
///
/// An explicitly passed path must exist and parse. The default location
/// (`~/.config/moodtunes/config.toml`) is optional; a missing file there
/// just means defaults.
fn load_config_file(explicit: Option<PathBuf>) -> Result<ConfigFile> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(ConfigFile::default()),
        },
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("moodtunes").join("config.toml"))
}
