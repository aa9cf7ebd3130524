use std::path::Path;

use crate::platform::Host;
use crate::utils::{AppError, AppResult};

/// Trash whatever sits at `destination`, copy `source` there and unmark it.
///
/// If the copy fails after the old copy was trashed, the old copy stays in the
/// Trash; nothing here puts it back.
pub fn install<H: Host + ?Sized>(host: &H, source: &Path, destination: &Path) -> AppResult<()> {
    if destination.symlink_metadata().is_ok() {
        log::info!("Moving existing {} to Trash", destination.display());
        host.move_to_trash(destination).map_err(|e| {
            AppError::InstallFailed(format!(
                "could not move {} to Trash: {}",
                destination.display(),
                e
            ))
        })?;
    }

    host.copy_bundle(source, destination).map_err(|e| {
        AppError::InstallFailed(format!(
            "could not copy {} to {}: {}",
            source.display(),
            destination.display(),
            e
        ))
    })?;

    if !destination.exists() {
        return Err(AppError::InstallFailed(format!(
            "{} is missing after the copy",
            destination.display()
        )));
    }

    host.clear_quarantine(destination).map_err(|e| {
        AppError::InstallFailed(format!(
            "could not clear quarantine on {}: {}",
            destination.display(),
            e
        ))
    })?;

    Ok(())
}
