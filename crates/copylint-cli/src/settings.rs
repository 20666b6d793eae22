use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when `--settings` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "copylint.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Project settings (`copylint.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub content: ContentPaths,
    pub report: ReportSettings,
}

/// Locations of the two content documents and the rules document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPaths {
    pub de: PathBuf,
    pub en: PathBuf,
    pub config: PathBuf,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            de: PathBuf::from("content/de.json"),
            en: PathBuf::from("content/en.json"),
            config: PathBuf::from("content/config.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Treat warnings as failures.
    pub strict: bool,
    /// Directory for run artifacts; runs are not recorded when unset.
    pub run_dir: Option<PathBuf>,
}

/// Load settings from an explicit path, or from `copylint.toml` when present.
///
/// An explicit path must exist; the implicit file falls back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> SettingsResult<ProjectSettings> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    if !path.exists() {
        if required {
            return Err(SettingsError::NotFound(path));
        }
        return Ok(ProjectSettings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> SettingsResult<ProjectSettings> {
    let settings: ProjectSettings = toml::from_str(content)?;
    Ok(settings)
}
