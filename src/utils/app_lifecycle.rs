use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use regex::Regex;

use crate::models::RelaunchRequest;
use crate::platform::Host;
use crate::utils::{shell_quote, AppError, AppResult};

pub const OPEN_PROGRAM: &str = "/usr/bin/open";

/// Seconds between liveness probes in the watcher.
const POLL_INTERVAL: &str = "0.1";

fn bundle_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"bundle ?path="([^"]+)""#).unwrap())
}

/// Bundle paths of every running GUI application.
/// Uses `lsappinfo list`, falling back to `ps` when that is unavailable.
pub fn running_bundle_paths() -> Vec<PathBuf> {
    if let Ok(output) = Command::new("lsappinfo")
        .current_dir("/tmp")
        .args(["list"])
        .output()
    {
        if output.status.success() {
            let paths = parse_lsappinfo(&String::from_utf8_lossy(&output.stdout));
            if !paths.is_empty() {
                return paths;
            }
        }
    }

    match Command::new("ps").current_dir("/tmp").args(["-axo", "comm="]).output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| enclosing_bundle(Path::new(line.trim())))
            .collect(),
        Err(e) => {
            log::warn!("Cannot list running processes: {}", e);
            Vec::new()
        }
    }
}

pub fn parse_lsappinfo(stdout: &str) -> Vec<PathBuf> {
    bundle_path_regex()
        .captures_iter(stdout)
        .filter_map(|c| c.get(1))
        .map(|m| PathBuf::from(m.as_str()))
        .collect()
}

/// Innermost `.app` directory containing an executable path.
pub fn enclosing_bundle(exe: &Path) -> Option<PathBuf> {
    exe.ancestors()
        .find(|p| p.extension().map_or(false, |ext| ext == "app"))
        .map(Path::to_path_buf)
}

/// Open (or bring forward) the application at `app_path`.
pub fn open_app(app_path: &Path) -> AppResult<()> {
    let output = Command::new(OPEN_PROGRAM)
        .current_dir("/tmp")
        .arg(app_path)
        .output()
        .map_err(|e| AppError::CommandFailed(format!("open: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(AppError::CommandFailed(format!(
            "open {} failed: {}",
            app_path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

/// Shell script for the watcher: poll `kill -0 <pid>` until the process is
/// gone, then open the destination (and detach the source disk image).
pub fn watcher_script(request: &RelaunchRequest, open_program: &str) -> String {
    let destination = shell_quote(&request.destination.to_string_lossy());
    let detach = request
        .detach_device
        .as_ref()
        .map(|dev| format!("; /usr/bin/hdiutil detach {} -force", shell_quote(dev)))
        .unwrap_or_default();

    format!(
        "(while kill -0 {pid} >/dev/null 2>&1; do sleep {interval}; done; {open} {dest}{detach}) >/dev/null 2>&1 &",
        pid = request.pid,
        interval = POLL_INTERVAL,
        open = open_program,
        dest = destination,
        detach = detach,
    )
}

/// Start `shell_cmd` under `/bin/sh` in its own process group with no stdio,
/// so it survives this process exiting.
pub fn spawn_detached(shell_cmd: &str) -> AppResult<()> {
    let mut child = Command::new("/bin/sh")
        .current_dir("/tmp")
        .args(["-c", shell_cmd])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .map_err(|e| AppError::CommandFailed(format!("Failed to spawn watcher: {}", e)))?;

    // The script backgrounds its work, so the shell itself returns at once.
    let status = child
        .wait()
        .map_err(|e| AppError::CommandFailed(format!("watcher shell: {}", e)))?;
    if !status.success() {
        return Err(AppError::CommandFailed(format!("watcher shell exited with {}", status)));
    }
    Ok(())
}

/// Hand the request to a detached watcher. Fire and forget: nothing reports back.
pub fn schedule_relaunch<H: Host + ?Sized>(host: &H, request: &RelaunchRequest) -> AppResult<()> {
    log::info!(
        "Scheduling relaunch of {} once pid {} exits",
        request.destination.display(),
        request.pid
    );
    host.spawn_detached(&watcher_script(request, OPEN_PROGRAM))
}
