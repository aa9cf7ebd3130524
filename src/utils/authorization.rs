use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::InstallDecision;
use crate::utils::applescript_quote;

/// AppleScript error number for "User canceled." in the password dialog.
pub const USER_CANCELED_CODE: i32 = -128;

fn error_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((-?\d+)\)\s*$").unwrap())
}

/// Run a compound shell expression with administrator privileges.
///
/// macOS shows its own authentication dialog; the call blocks until the user
/// answers it and the command has finished.
pub fn run_elevated_shell(shell_cmd: &str) -> InstallDecision {
    let script = format!(
        "do shell script \"{}\" with administrator privileges",
        applescript_quote(shell_cmd)
    );
    log::debug!("Requesting administrator privileges for: {}", shell_cmd);

    let output = match Command::new("osascript")
        .current_dir("/tmp")
        .args(["-e", &script])
        .output()
    {
        Ok(o) => o,
        Err(e) => {
            return InstallDecision::Failed {
                code: e.raw_os_error().unwrap_or(-1),
                message: format!("Failed to run osascript: {}", e),
            }
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    parse_elevation_result(output.status.success(), output.status.code(), &stderr)
}

/// Map osascript's exit status and stderr to an [`InstallDecision`].
///
/// Failures look like `0:98: execution error: User canceled. (-128)`; the
/// trailing number is the AppleScript error code.
pub fn parse_elevation_result(success: bool, exit_code: Option<i32>, stderr: &str) -> InstallDecision {
    if success {
        return InstallDecision::Success;
    }

    let message = stderr.trim();
    let code = error_code_regex()
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok());

    match code {
        Some(USER_CANCELED_CODE) => InstallDecision::Cancelled,
        Some(code) => InstallDecision::Failed {
            code,
            message: message.to_string(),
        },
        None => InstallDecision::Failed {
            code: exit_code.unwrap_or(-1),
            message: message.to_string(),
        },
    }
}
