use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::classifier::DetectionConfig;

/// On-disk shape of the settings file. Wrapping the detection block keeps
/// the file forward-compatible if the host grows more sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    detection: DetectionConfig,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
        }
    }
}

/// JSON file-backed store for the detection thresholds.
///
/// The thresholds were retuned once already after road testing, so the host
/// must be able to adjust them without shipping a new binary. Unreadable or
/// missing files fall back to defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn detection(&self) -> DetectionConfig {
        self.data.read().unwrap().detection.clone()
    }

    pub fn update_detection(&self, config: DetectionConfig) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.detection = config;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
