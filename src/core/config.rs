use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::alerts::categories::CategoryRules;
use super::alerts::model::AlertSettings;
use super::error::Result;
use super::tracker::SnapshotFilter;

/// Radar settings, persisted as settings.json.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Yalms around the player that show up on the radar
    pub detection_radius: f32,
    pub hide_unnamed: bool,
    pub categories: CategoryRules,
    pub alerts: AlertSettings,
    pub check_interval_ms: u64,
    /// Directory holding ping.wav, alert.wav, ...
    pub sound_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detection_radius: 50.0,
            hide_unnamed: true,
            categories: CategoryRules::default(),
            alerts: AlertSettings::default(),
            check_interval_ms: 50,
            sound_dir: None,
        }
    }
}

impl Settings {
    pub fn snapshot_filter(&self) -> SnapshotFilter {
        SnapshotFilter {
            detection_radius: self.detection_radius,
            hide_unnamed: self.hide_unnamed,
            categories: self.categories.clone(),
        }
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(app_config_dir: PathBuf) -> Self {
        Self {
            config_path: app_config_dir.join("settings.json"),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Missing or unreadable settings fall back to defaults
    pub fn load(&self) -> Settings {
        if !self.config_path.exists() {
            return Settings::default();
        }

        match fs::read_to_string(&self.config_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Ignoring malformed {:?}: {}", self.config_path, e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {:?}: {}", self.config_path, e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }
}
