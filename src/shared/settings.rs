use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::shared::errors::{CommandError, CommandResult};
use crate::shared::types::Category;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the history database. `None` uses the project data dir.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub default_category: Category,
    /// Ask before wiping the history
    pub confirm_clear: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_category: Category::Length,
            confirm_clear: true,
        }
    }
}

fn project_dirs() -> CommandResult<ProjectDirs> {
    ProjectDirs::from("com", "antigravity", "unit-converter")
        .ok_or_else(|| CommandError::SystemIO("Failed to determine project directories".to_string()))
}

impl AppSettings {
    pub fn get_settings_path() -> CommandResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, writing defaults on first run
    pub fn load() -> CommandResult<Self> {
        Self::load_from(&Self::get_settings_path()?)
    }

    pub fn load_from(path: &Path) -> CommandResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            debug!(path = %path.display(), "wrote default settings");
            return Ok(settings);
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            CommandError::InvalidInput(format!("Failed to parse settings: {}", e))
        })
    }

    /// Like [`AppSettings::load`], but never fails: problems fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load settings, using defaults");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> CommandResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CommandError::SystemIO(format!("Failed to serialize settings: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Category named by the caller, or the configured default when none is given
    pub fn resolve_category(&self, requested: Option<&str>) -> CommandResult<Category> {
        match requested {
            Some(name) => name.parse(),
            None => Ok(self.preferences.default_category),
        }
    }

    /// Directory for the history database, honouring the override
    pub fn data_dir(&self) -> CommandResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}
