//! Process-wide settings with an explicit load/save lifecycle.
//!
//! The rule set and the small settings record are the only persisted state
//! in the system. They are owned by [`SettingsStore`] and injected into
//! the dispatcher; nothing reads them as ambient globals.

use crate::rule::Rule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error reading or writing the settings file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for the current shape.
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persisted settings record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewdaySettings {
    /// Identifier of the embedded calendar view.
    pub widget_id: String,
    /// Mapping rules configured from the remote surface.
    pub rules: Vec<Rule>,
    /// Folder for generated meeting notes; store root when unset.
    pub meeting_note_folder: Option<String>,
}

/// Owner of the persisted settings record.
pub struct SettingsStore {
    path: PathBuf,
    settings: ViewdaySettings,
}

impl SettingsStore {
    /// Load settings from disk; a missing file yields defaults.
    pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let settings = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, starting from defaults");
                ViewdaySettings::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, settings })
    }

    /// Build a store around explicit settings, without touching disk.
    pub fn new(path: impl Into<PathBuf>, settings: ViewdaySettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &ViewdaySettings {
        &self.settings
    }

    pub fn rules(&self) -> &[Rule] {
        &self.settings.rules
    }

    /// Replace the rule set and persist immediately. This is the only
    /// mutation path for rules; it is driven by the configuration message.
    pub fn replace_rules(&mut self, rules: Vec<Rule>) -> SettingsResult<()> {
        info!(count = rules.len(), "replacing mapping rules");
        self.settings.rules = rules;
        self.save()
    }

    /// Persist the current settings to disk.
    pub fn save(&self) -> SettingsResult<()> {
        let raw = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> Rule {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id,
            "property": "due",
            "color": "#a3be8c",
            "active": true,
        }))
        .unwrap()
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.settings(), &ViewdaySettings::default());
    }

    #[test]
    fn replace_rules_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = SettingsStore::load(&path).unwrap();
        store.replace_rules(vec![rule("r1"), rule("r2")]).unwrap();

        let reloaded = SettingsStore::load(&path).unwrap();
        assert_eq!(reloaded.rules().len(), 2);
        assert_eq!(reloaded.rules()[0].id, "r1");
    }

    #[test]
    fn settings_survive_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"widgetId":"w-1","rules":[],"someFutureField":true}"#,
        )
        .unwrap();

        let store = SettingsStore::load(&path).unwrap();
        assert_eq!(store.settings().widget_id, "w-1");
    }
}
