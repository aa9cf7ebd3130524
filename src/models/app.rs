use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A self-contained application bundle captured at process start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BundleInfo {
    pub path: PathBuf,
    pub bundle_id: Option<String>,
    pub display_name: String,
    pub version: Option<String>,
}

impl BundleInfo {
    /// The bundle's directory name as it currently sits on disk, e.g. `Foo.app`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| ensure_app_suffix(&self.display_name))
    }
}

/// A resolved destination: the Applications folder plus the bundle name to use there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub directory: PathBuf,
    pub name: String,
}

impl InstallTarget {
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
        }
    }

    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Append `.app` unless the name already carries it.
pub fn ensure_app_suffix(name: &str) -> String {
    if name.ends_with(".app") {
        name.to_string()
    } else {
        format!("{}.app", name)
    }
}
