//! `[logging]` settings section for applications that keep configuration in
//! TOML.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Logging settings as they appear under `[logging]`.
///
/// Every key is optional; present keys are applied as explicit builder
/// options and so take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level: trace, debug, info, warn, error, fatal, panic, no, disabled
    pub level: Option<String>,

    /// Log format: "json" or "console"
    pub format: Option<String>,

    /// strftime-style timestamp format
    pub time_format: Option<String>,

    /// Append output to this file (supports `~`)
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    logging: Settings,
}

impl Settings {
    /// Parse the `[logging]` table out of a TOML document.
    ///
    /// Other tables are ignored; a document without `[logging]` yields
    /// default (empty) settings.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let document: Document = toml::from_str(content)?;
        Ok(document.logging)
    }

    /// Load settings from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The file path with `~` expanded.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_ref().map(|path| {
            let path_str = path.to_string_lossy();
            PathBuf::from(shellexpand::tilde(&path_str).into_owned())
        })
    }
}
