// SPDX-License-Identifier: MPL-2.0
//! Service configuration.
//!
//! This module handles the client configuration for the remote storage and
//! transform services, loaded from and saved to a `settings.toml` file in
//! the platform config directory.
//!
//! # Examples
//!
//! ```no_run
//! use lumina_studio::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.api_key = Some("sk-live-123".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::domain::directive::Quality;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LuminaStudio";

/// Default timeout applied to each remote request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

fn default_upload_endpoint() -> String {
    "https://api.lumina.studio/v1/assets".to_string()
}

fn default_transform_endpoint() -> String {
    "https://api.lumina.studio/v1/transforms".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage service endpoint receiving uploads.
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,
    /// Transform service endpoint.
    #[serde(default = "default_transform_endpoint")]
    pub transform_endpoint: String,
    /// Bearer token for both services, if required.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Output quality requested from the transform service.
    #[serde(default)]
    pub quality: Quality,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_endpoint: default_upload_endpoint(),
            transform_endpoint: default_transform_endpoint(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            quality: Quality::default(),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_sane_values() {
        let config = Config::default();
        assert!(config.upload_endpoint.starts_with("https://"));
        assert!(config.transform_endpoint.starts_with("https://"));
        assert!(config.api_key.is_none());
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.quality, Quality::High);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut config = Config::default();
        config.api_key = Some("sk-test".to_string());
        config.quality = Quality::Standard;
        config.request_timeout_secs = 15;

        save_to_path(&config, &path).expect("save");
        let loaded = load_from_path(&path).expect("load");

        assert_eq!(loaded.api_key.as_deref(), Some("sk-test"));
        assert_eq!(loaded.quality, Quality::Standard);
        assert_eq!(loaded.request_timeout_secs, 15);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "api_key = \"sk-partial\"\n").expect("write");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("sk-partial"));
        assert_eq!(loaded.upload_endpoint, default_upload_endpoint());
        assert_eq!(loaded.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not = [valid").expect("write");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded.upload_endpoint, default_upload_endpoint());
    }
}
