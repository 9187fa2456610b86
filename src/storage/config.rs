use super::Result;
use crate::api::client::DEFAULT_BASE_URL;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Profile {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Wrap an I/O failure with the path it happened on
fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    move |source| StorageError::FileIo {
        path: path.display().to_string(),
        source,
    }
}

impl Config {
    /// Read the profiles file. A file that does not exist yet is an empty config.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(io_error(&path)(err)),
        };

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Write the profiles file, creating its directory on first save
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let path = Self::resolve_path(path)?;
        let serialized =
            toml::to_string_pretty(self).map_err(|e| StorageError::ConfigSaveFailed {
                message: e.to_string(),
            })?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_error(dir))?;
        }
        fs::write(&path, serialized).map_err(io_error(&path))
    }

    fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf> {
        path.map_or_else(Self::config_file_path, Ok)
    }

    /// `<config dir>/customer-desk/config.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("customer-desk").join("config.toml"))
            .ok_or(StorageError::ConfigDirNotFound)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Name of the profile to use: explicit choice, then the configured default, then "default"
    pub fn resolve_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".to_string())
    }
}
