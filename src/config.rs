use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vault::write_atomic;

fn default_my_setting() -> String {
    "default".to_string()
}

/// Plugin settings, persisted as the plugin's data.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "mySetting", default = "default_my_setting")]
    pub my_setting: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            my_setting: default_my_setting(),
        }
    }
}

/// Loads and saves [`Settings`] at one file path.
///
/// The store owns no settings itself; the app keeps the single
/// `Settings` instance and hands it to `save` after each change.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults overlaid with whatever fields are persisted.
    /// A missing, unreadable or malformed file falls back to defaults.
    pub fn load(&self) -> Settings {
        match self.load_with_error() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no persisted settings, using defaults");
                Settings::default()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring persisted settings");
                Settings::default()
            }
        }
    }

    /// Ok(None) when nothing has been persisted yet
    pub fn load_with_error(&self) -> Result<Option<Settings>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // null / 빈 파일은 저장된 값이 없는 것으로 취급
        if content.trim().is_empty() || content.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes the full record back using the atomic write pattern
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("plugins/x/data.json"));
        (dir, store)
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(Settings::default().my_setting, "default");
    }

    #[test]
    fn test_load_without_file_returns_default() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = temp_store();
        let mut settings = store.load();
        settings.my_setting = "hunter2".to_string();
        store.save(&settings).unwrap();
        assert_eq!(store.load().my_setting, "hunter2");
    }

    #[test]
    fn test_parse_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(settings.my_setting, "default");
    }

    #[test]
    fn test_serialized_key_name() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, r#"{"mySetting":"default"}"#);
    }

    #[test]
    fn test_malformed_json_falls_back_to_default() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load_with_error().is_err());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_null_file_is_absent() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "null").unwrap();
        assert!(store.load_with_error().unwrap().is_none());
    }
}
