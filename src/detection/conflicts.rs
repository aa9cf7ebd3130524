use std::path::{Path, PathBuf};

use super::bundle_reader;
use super::version_compare;
use crate::utils::normalize_path;

/// True if one of the running applications lives at `destination`.
pub fn is_running_at(destination: &Path, running: &[PathBuf]) -> bool {
    let wanted = normalize_path(destination);
    running.iter().any(|p| normalize_path(p) == wanted)
}

/// True if `destination` holds a strictly newer version than `current_version`.
///
/// Missing or unreadable versions on either side count as "not newer" so the
/// move is still offered.
pub fn is_newer_installed(destination: &Path, current_version: Option<&str>) -> bool {
    if !destination.exists() {
        return false;
    }

    let installed = match bundle_reader::read_bundle(destination).and_then(|b| b.version) {
        Some(v) => v,
        None => {
            log::warn!(
                "Could not read the version installed at {}, allowing the move",
                destination.display()
            );
            return false;
        }
    };

    let current = match current_version {
        Some(v) => v,
        None => {
            log::warn!("Running bundle has no version, allowing the move");
            return false;
        }
    };

    match version_compare::compare_versions(current, &installed) {
        Some(ordering) => {
            let newer = ordering == std::cmp::Ordering::Less;
            log::info!(
                "Installed version {} vs running {}: {}",
                installed,
                current,
                if newer { "installed is newer" } else { "not newer" }
            );
            newer
        }
        None => {
            log::warn!(
                "Cannot compare versions {:?} and {:?}, allowing the move",
                current,
                installed
            );
            false
        }
    }
}
