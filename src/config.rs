use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File loaded at startup and used by a bare `save`.
    pub tasks_file: Option<PathBuf>,
    pub color: bool,
    pub prompt: String,
    /// Log filter used when `TASKER_LOG` is unset, in `EnvFilter` syntax.
    pub log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: None,
            color: true,
            prompt: "> ".to_string(),
            log: "tasker=info,warn".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// `~/.config/tasker/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasker/config.toml"))
    }

    /// Load from `explicit` if given, which must exist, otherwise from the
    /// default location, falling back to defaults when that file is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
