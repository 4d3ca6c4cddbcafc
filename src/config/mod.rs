// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! The token secret deserves a note: signed tokens (registration and password
//! recovery) are authenticated with a key derived from this value. When it is
//! absent from the config file, the `SHOPFRONT_TOKEN_SECRET` environment
//! variable is consulted instead, so deployments never need to write the
//! secret to disk.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Shopfront";

/// Environment variable consulted when `token_secret` is not configured.
pub const ENV_TOKEN_SECRET: &str = "SHOPFRONT_TOKEN_SECRET";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub token_secret: Option<String>,
}

impl Config {
    /// Resolves the token secret: config file first, then environment.
    #[must_use]
    pub fn resolve_token_secret(&self) -> Option<String> {
        self.token_secret
            .clone()
            .or_else(|| std::env::var(ENV_TOKEN_SECRET).ok())
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
