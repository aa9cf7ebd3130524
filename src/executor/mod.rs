pub mod direct;
pub mod elevated;

use std::path::Path;

use crate::models::InstallDecision;
use crate::platform::Host;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    Direct,
    Elevated,
}

impl InstallMode {
    pub fn for_authorization(needs_authorization: bool) -> Self {
        if needs_authorization {
            InstallMode::Elevated
        } else {
            InstallMode::Direct
        }
    }
}

/// Replace `destination` with a copy of `source` and clear its quarantine flag.
///
/// Direct installs either succeed or return `Err(InstallFailed)`. Elevated
/// installs report every outcome, including the user dismissing the password
/// dialog, through the returned [`InstallDecision`]. Either way `Success` means
/// the destination bundle exists.
pub fn install<H: Host + ?Sized>(
    host: &H,
    source: &Path,
    destination: &Path,
    mode: InstallMode,
) -> AppResult<InstallDecision> {
    log::info!(
        "Installing {} to {} ({:?})",
        source.display(),
        destination.display(),
        mode
    );
    match mode {
        InstallMode::Direct => {
            direct::install(host, source, destination)?;
            Ok(InstallDecision::Success)
        }
        InstallMode::Elevated => match elevated::install(host, source, destination) {
            InstallDecision::Success if !destination.exists() => Err(AppError::InstallFailed(
                format!("{} is missing after the administrator install", destination.display()),
            )),
            decision => Ok(decision),
        },
    }
}
