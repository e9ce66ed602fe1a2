use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// File name looked up in the working directory when no path is given
pub const CONFIG_FILE: &str = "hubtrack.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read the config file. A missing file gives the defaults; a file that
/// exists but does not parse is an error.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the config from an explicit path, or `./hubtrack.toml`
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => read_config(Path::new(CONFIG_FILE)),
    }
}
