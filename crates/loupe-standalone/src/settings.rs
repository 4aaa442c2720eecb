use std::path::PathBuf;

use loupe_core::{FilterMode, SettingsStore};
use serde::{Deserialize, Serialize};

const SETTINGS_VERSION: u32 = 1;

/// On-disk settings file format.
#[derive(Serialize, Deserialize)]
struct SettingsFile {
    version: u32,
    filter_mode: u32,
}

/// Filter persistence backed by a JSON file in the user config dir.
///
/// Storage problems never fail the caller: a missing or unreadable file
/// loads the default, a failed write is logged and dropped.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Self {
        let path = dirs::config_dir()
            .map(|dir| dir.join("loupe").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("loupe-settings.json"));
        Self::new(path)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load_filter_mode(&self) -> FilterMode {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            // First run: nothing saved yet.
            Err(_) => return FilterMode::Normal,
        };
        match serde_json::from_str::<SettingsFile>(&json) {
            Ok(file) => FilterMode::from_index(file.filter_mode),
            Err(e) => {
                log::warn!("ignoring malformed settings file {}: {e}", self.path.display());
                FilterMode::Normal
            }
        }
    }

    fn save_filter_mode(&self, mode: FilterMode) {
        let file = SettingsFile {
            version: SETTINGS_VERSION,
            filter_mode: mode.index() as u32,
        };
        let json = match serde_json::to_string_pretty(&file) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to encode settings: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("failed to create settings dir {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, json) {
            log::warn!("failed to write settings {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("loupe-{}-{}", std::process::id(), name))
    }

    #[test]
    fn filter_mode_roundtrips_through_disk() {
        let path = temp_path("roundtrip.json");
        let store = JsonSettingsStore::new(path.clone());
        store.save_filter_mode(FilterMode::Grayscale);
        assert_eq!(store.load_filter_mode(), FilterMode::Grayscale);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_loads_default() {
        let store = JsonSettingsStore::new(temp_path("does-not-exist.json"));
        assert_eq!(store.load_filter_mode(), FilterMode::Normal);
    }

    #[test]
    fn malformed_file_loads_default() {
        let path = temp_path("malformed.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonSettingsStore::new(path.clone());
        assert_eq!(store.load_filter_mode(), FilterMode::Normal);
        let _ = std::fs::remove_file(path);
    }
}
