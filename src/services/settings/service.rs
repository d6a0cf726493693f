use crate::models::settings::GridSettings;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE: &str = "grid.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    /// Service bound to an explicit settings file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to `grid.toml` in the platform config directory, or the
    /// working directory when none can be resolved.
    pub fn from_project_dirs() -> Self {
        let path = ProjectDirs::from("com", "ScheduleGrid", "ScheduleGrid")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the settings file
    pub fn load(&self) -> Result<GridSettings, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings: GridSettings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        settings.validate().map_err(ConfigError::Invalid)?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is absent or bad.
    pub fn load_or_default(&self) -> GridSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", self.path.display());
                GridSettings::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings: {}, using defaults", e);
                GridSettings::default()
            }
        }
    }

    /// Validate and write settings, creating parent directories as needed
    pub fn save(&self, settings: &GridSettings) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::Invalid)?;
        let text = toml::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}
