use serde::{Deserialize, Serialize};

use super::app::{ensure_app_suffix, BundleInfo};

/// How the relocated bundle is named inside the Applications folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum NameStrategy {
    BundleDisplayName,
    OnDiskName,
    Custom(String),
}

impl NameStrategy {
    pub fn resolve(&self, bundle: &BundleInfo) -> String {
        match self {
            NameStrategy::BundleDisplayName => ensure_app_suffix(&bundle.display_name),
            NameStrategy::OnDiskName => bundle.file_name(),
            NameStrategy::Custom(name) => ensure_app_suffix(name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoveOptions {
    pub name_strategy: NameStrategy,
    pub replace_newer_versions: bool,
    /// Only honored in builds compiled with debug assertions.
    pub skip_in_debug_builds: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            name_strategy: NameStrategy::BundleDisplayName,
            replace_newer_versions: false,
            skip_in_debug_builds: true,
        }
    }
}

/// Answers persisted between launches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub alert_suppressed: bool,
}
