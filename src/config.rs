use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::{DEFAULT_API_URL, UNCONFIGURED_TOKEN};

/// Name of the config file looked up in the home directory.
pub const CONFIG_FILENAME: &str = ".repo-stats.json";

/// Contents of the JSON config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub access_token: Option<String>,
    pub verbose: Option<bool>,
    pub api_url: Option<String>,
}

/// Settings given on the command line, `None` where the flag was absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub access_token: Option<String>,
    pub verbose: bool,
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Raw token; still [`UNCONFIGURED_TOKEN`] if nothing set one.
    pub access_token: String,
    pub verbose: bool,
    pub api_url: String,
}

/// Parses config file content. Whitespace-only content is an empty config.
pub fn parse_config(content: &[u8]) -> Result<FileConfig> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(FileConfig::default());
    }
    serde_json::from_slice(content).context("Failed to parse config JSON")
}

pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILENAME))
}

/// Loads `explicit` if given, otherwise the file at [`default_path`].
///
/// Only a missing default file is tolerated.
pub fn load(explicit: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => return Ok((FileConfig::default(), None)),
        },
    };
    let content = fs::read(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok((config, Some(path)))
}

impl Settings {
    /// Flags win over the environment, which wins over the file.
    pub fn merge(flags: Overrides, env_token: Option<String>, file: FileConfig) -> Settings {
        Settings {
            access_token: flags
                .access_token
                .or(env_token.filter(|token| !token.trim().is_empty()))
                .or(file.access_token)
                .unwrap_or_else(|| UNCONFIGURED_TOKEN.to_string()),
            verbose: flags.verbose || file.verbose.unwrap_or(false),
            api_url: flags
                .api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}
