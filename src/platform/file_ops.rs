use std::path::Path;
use std::process::Command;

use crate::utils::{applescript_quote, AppError, AppResult};

pub const QUARANTINE_ATTRIBUTE: &str = "com.apple.quarantine";

/// Move a path to Trash via Finder AppleScript (reversible).
pub fn move_to_trash(path: &Path) -> AppResult<()> {
    let output = Command::new("osascript")
        .current_dir("/tmp")
        .args([
            "-e",
            &format!(
                "tell application \"Finder\" to move POSIX file \"{}\" to trash",
                applescript_quote(&path.to_string_lossy())
            ),
        ])
        .output()
        .map_err(|e| AppError::CommandFailed(format!("Failed to run osascript: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(AppError::CommandFailed(format!("Finder trash failed: {}", stderr.trim())))
    }
}

/// Copy a bundle with `ditto`, keeping permissions, extended attributes and
/// resource forks.
pub fn copy_bundle(source: &Path, destination: &Path) -> AppResult<()> {
    let output = Command::new("/usr/bin/ditto")
        .current_dir("/tmp")
        .arg(source)
        .arg(destination)
        .output()
        .map_err(|e| AppError::CommandFailed(format!("Failed to run ditto: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(AppError::CommandFailed(format!("ditto failed: {}", stderr.trim())))
    }
}

/// Recursively strip the quarantine attribute. A tree without it is fine.
pub fn clear_quarantine(path: &Path) -> AppResult<()> {
    let output = Command::new("/usr/bin/xattr")
        .current_dir("/tmp")
        .args(["-d", "-r", QUARANTINE_ATTRIBUTE])
        .arg(path)
        .output()
        .map_err(|e| AppError::CommandFailed(format!("Failed to run xattr: {}", e)))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() || is_missing_attribute_only(&stderr) {
        Ok(())
    } else {
        Err(AppError::CommandFailed(format!("xattr failed: {}", stderr.trim())))
    }
}

/// xattr reports "No such xattr" for every file that never had the attribute.
fn is_missing_attribute_only(stderr: &str) -> bool {
    let mut lines = stderr.lines().filter(|l| !l.trim().is_empty()).peekable();
    lines.peek().is_some() && lines.all(|l| l.contains("No such xattr"))
}
