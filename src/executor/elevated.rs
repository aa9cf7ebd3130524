use std::path::Path;

use crate::models::InstallDecision;
use crate::platform::file_ops::QUARANTINE_ATTRIBUTE;
use crate::platform::Host;
use crate::utils::shell_quote;

/// One privileged shell command: remove, copy, unmark. `&&` stops at the
/// first failing step so a failed delete never reaches the copy.
pub fn elevated_install_script(source: &Path, destination: &Path) -> String {
    let src = shell_quote(&source.to_string_lossy());
    let dst = shell_quote(&destination.to_string_lossy());
    format!(
        "/bin/rm -rf {dst} && /usr/bin/ditto {src} {dst} && /usr/bin/find {dst} -xattrname {attr} -exec /usr/bin/xattr -d {attr} {{}} +",
        src = src,
        dst = dst,
        attr = QUARANTINE_ATTRIBUTE,
    )
}

pub fn install<H: Host + ?Sized>(host: &H, source: &Path, destination: &Path) -> InstallDecision {
    let decision = host.run_elevated(&elevated_install_script(source, destination));
    match &decision {
        InstallDecision::Success => log::info!("Administrator install finished"),
        InstallDecision::Cancelled => log::info!("Administrator authentication was cancelled"),
        InstallDecision::Failed { code, message } => {
            log::error!("Administrator install failed ({}): {}", code, message)
        }
    }
    decision
}
