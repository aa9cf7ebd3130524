use std::path::PathBuf;

use crate::models::{BundleInfo, Preferences};
use crate::utils::{AppError, AppResult};

/// JSON file holding [`Preferences`] for one bundle.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// `<config_dir>/app-relocator/<bundle id or name>.json`
    pub fn for_bundle(bundle: &BundleInfo) -> Self {
        let key = bundle
            .bundle_id
            .clone()
            .unwrap_or_else(|| bundle.display_name.clone());
        Self {
            path: dirs::config_dir().map(|d| d.join("app-relocator").join(format!("{}.json", key))),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// A store that never remembers anything.
    pub fn ephemeral() -> Self {
        Self { path: None }
    }

    pub fn load(&self) -> Preferences {
        let Some(path) = &self.path else {
            return Preferences::default();
        };
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(_) => return Preferences::default(),
        };
        match serde_json::from_str(&data) {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Ignoring unreadable preferences at {}: {}", path.display(), e);
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| AppError::Custom(format!("Failed to serialize preferences: {}", e)))?;
        std::fs::write(path, json)?;
        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(tmp.path().join("nested/prefs.json"));
        assert_eq!(store.load(), Preferences::default());

        store.save(&Preferences { alert_suppressed: true }).unwrap();
        assert!(store.load().alert_suppressed);
    }

    #[test]
    fn test_corrupt_file_degrades_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(PreferenceStore::at(&path).load(), Preferences::default());
    }

    #[test]
    fn test_ephemeral_store() {
        let store = PreferenceStore::ephemeral();
        store.save(&Preferences { alert_suppressed: true }).unwrap();
        assert!(!store.load().alert_suppressed);
    }
}
