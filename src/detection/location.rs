use std::path::{Path, PathBuf};

use crate::utils::normalize_path;

/// Directory name treated as an install root wherever it appears in a path.
pub const INSTALL_ROOT_NAME: &str = "Applications";

/// True if `path` already lives in an Applications folder.
///
/// Two independent checks: the path sits under one of the known install
/// directories, or any of its segments is literally `Applications` (catches
/// mirrored roots such as `/Volumes/X/Applications`).
pub fn is_in_applications_folder(path: &Path, install_dirs: &[PathBuf]) -> bool {
    is_under_install_directory(path, install_dirs) || has_install_root_segment(path)
}

fn is_under_install_directory(path: &Path, install_dirs: &[PathBuf]) -> bool {
    let normalized = normalize_path(path);
    install_dirs
        .iter()
        .any(|dir| path.starts_with(dir) || normalized.starts_with(normalize_path(dir)))
}

fn has_install_root_segment(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == INSTALL_ROOT_NAME)
}
