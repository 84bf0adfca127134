//! Configuration for the registry client.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SchtasksError};
use crate::registry::decoder::{DEFAULT_CODEPAGE, ResponseDecoder};

/// Client settings, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name or path of the task-scheduling utility.
    pub program: String,
    /// WHATWG encoding label of the utility's output.
    ///
    /// `windows-31j` is cp932, what the utility writes on a Japanese-locale
    /// host. Use `utf-8` or `windows-1252` for other locales.
    pub codepage: String,
    /// Fail verbose queries that return more than one row instead of keeping
    /// the last row.
    pub strict_single_row: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: "schtasks".to_owned(),
            codepage: DEFAULT_CODEPAGE.to_owned(),
            strict_single_row: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it names an
    /// unknown codepage.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            SchtasksError::Config(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that TOML parsing alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Config`] if `program` is blank or `codepage`
    /// is not a recognised encoding label.
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(SchtasksError::Config("program must not be empty".to_owned()));
        }
        ResponseDecoder::for_label(&self.codepage).map(|_| ())
    }

    /// Load the default config file if it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_config_path();
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SchtasksError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/schtasks-admin/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("schtasks-admin")
                .join("config.toml")
        } else if let Some(config) = dirs::config_dir() {
            config.join("schtasks-admin").join("config.toml")
        } else {
            std::env::temp_dir()
                .join("schtasks-admin")
                .join("config.toml")
        }
    }
}
