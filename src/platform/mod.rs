pub mod dialog;
pub mod file_ops;
pub mod permissions;

use std::path::{Path, PathBuf};

use crate::detection::{disk_image, target};
use crate::models::InstallDecision;
use crate::utils::{app_lifecycle, authorization, AppResult};

/// Every OS service the relocation flow touches.
///
/// [`MacHost`] talks to the real system; tests drive the flow through a fake.
pub trait Host {
    /// Applications folders of the user, local, network and system domains, in that order.
    fn application_directories(&self) -> Vec<PathBuf>;

    /// The OS-owned Applications folder that is never a destination.
    fn protected_directory(&self) -> PathBuf {
        PathBuf::from(target::PROTECTED_ROOT)
    }

    fn running_bundle_paths(&self) -> Vec<PathBuf>;

    fn is_writable(&self, path: &Path) -> bool {
        permissions::is_writable(path)
    }

    fn open(&self, path: &Path) -> AppResult<()>;

    fn move_to_trash(&self, path: &Path) -> AppResult<()>;

    fn copy_bundle(&self, source: &Path, destination: &Path) -> AppResult<()>;

    fn clear_quarantine(&self, path: &Path) -> AppResult<()>;

    /// Run a shell command behind the administrator authorization prompt.
    fn run_elevated(&self, shell_cmd: &str) -> InstallDecision;

    fn spawn_detached(&self, shell_cmd: &str) -> AppResult<()>;

    fn disk_image_device(&self, path: &Path) -> Option<String>;

    fn current_pid(&self) -> u32 {
        std::process::id()
    }

    /// Ends the process with status 0. Never returns.
    fn terminate(&self) -> ! {
        log::info!("Exiting so the relocated copy can take over");
        std::process::exit(0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MacHost;

impl Host for MacHost {
    fn application_directories(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join("Applications"));
        }
        candidates.extend(
            ["/Applications", "/Network/Applications", "/System/Applications"]
                .into_iter()
                .map(PathBuf::from),
        );
        candidates
    }

    fn running_bundle_paths(&self) -> Vec<PathBuf> {
        app_lifecycle::running_bundle_paths()
    }

    fn open(&self, path: &Path) -> AppResult<()> {
        app_lifecycle::open_app(path)
    }

    fn move_to_trash(&self, path: &Path) -> AppResult<()> {
        file_ops::move_to_trash(path)
    }

    fn copy_bundle(&self, source: &Path, destination: &Path) -> AppResult<()> {
        file_ops::copy_bundle(source, destination)
    }

    fn clear_quarantine(&self, path: &Path) -> AppResult<()> {
        file_ops::clear_quarantine(path)
    }

    fn run_elevated(&self, shell_cmd: &str) -> InstallDecision {
        authorization::run_elevated_shell(shell_cmd)
    }

    fn spawn_detached(&self, shell_cmd: &str) -> AppResult<()> {
        app_lifecycle::spawn_detached(shell_cmd)
    }

    fn disk_image_device(&self, path: &Path) -> Option<String> {
        disk_image::containing_disk_image_device(path)
    }
}
