use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::Host;

/// Whether the current process may write to `path`, per `access(2)`.
pub fn is_writable(path: &Path) -> bool {
    let c_path = match CString::new(path.as_os_str().as_bytes()) {
        Ok(p) => p,
        Err(_) => return false,
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

/// An entry needs elevation when it exists and we cannot write to it.
fn existing_but_unwritable<H: Host + ?Sized>(host: &H, path: &Path) -> bool {
    path.symlink_metadata().is_ok() && !host.is_writable(path)
}

/// True when installing to `destination` inside `install_dir` requires
/// administrator rights: either the existing destination or the folder itself
/// is not writable.
pub fn needs_authorization<H: Host + ?Sized>(host: &H, destination: &Path, install_dir: &Path) -> bool {
    let destination_locked = existing_but_unwritable(host, destination);
    let directory_locked = existing_but_unwritable(host, install_dir);
    if destination_locked || directory_locked {
        log::info!(
            "Administrator rights needed (destination locked: {}, folder locked: {})",
            destination_locked,
            directory_locked
        );
    }
    destination_locked || directory_locked
}
