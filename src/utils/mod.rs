pub mod app_lifecycle;
pub mod authorization;
pub mod error;
pub mod plist_parser;
pub mod preferences;

use std::path::{Path, PathBuf};

pub use error::{AppError, AppResult};

/// Normalize a path for equality checks.
///
/// Existing paths are resolved through symlinks; anything else is normalized
/// lexically, which drops trailing slashes and `.` segments.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return resolved;
    }
    path.components().collect()
}

/// Escape a string for use inside a shell command.
pub fn shell_quote(s: &str) -> String {
    if !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '/' || c == '.' || c == '-' || c == '_')
    {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

/// Escape a string for embedding in an AppleScript string literal.
pub fn applescript_quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
