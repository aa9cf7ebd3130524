use std::path::PathBuf;

/// Result of an install attempt that may have gone through the authorization prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallDecision {
    Success,
    /// The user dismissed the administrator password dialog.
    Cancelled,
    Failed { code: i32, message: String },
}

/// Where a relocation attempt ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    SkippedDebugBuild,
    Suppressed,
    AlreadyInstalled,
    Declined,
    SwitchedToRunning(PathBuf),
    SwitchedToNewer(PathBuf),
    Relocated(PathBuf),
}

impl MoveOutcome {
    /// Outcomes after which the current process must exit with status 0.
    pub fn terminates(&self) -> bool {
        matches!(
            self,
            MoveOutcome::SwitchedToRunning(_)
                | MoveOutcome::SwitchedToNewer(_)
                | MoveOutcome::Relocated(_)
        )
    }
}

/// Text shown by the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationText {
    pub title: String,
    pub body: String,
    pub accept_label: String,
    pub decline_label: String,
}

/// The user's answer to the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub accepted: bool,
    pub suppress_future_prompts: bool,
}

impl Confirmation {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            suppress_future_prompts: false,
        }
    }

    pub fn decline() -> Self {
        Self {
            accepted: false,
            suppress_future_prompts: false,
        }
    }
}

/// Handed to the watcher process: wait for `pid` to die, then open `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaunchRequest {
    pub pid: u32,
    pub destination: PathBuf,
    /// Disk image to detach once the relocated copy has been opened.
    pub detach_device: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_outcomes() {
        assert!(MoveOutcome::Relocated(PathBuf::from("/Applications/A.app")).terminates());
        assert!(MoveOutcome::SwitchedToNewer(PathBuf::from("/Applications/A.app")).terminates());
        assert!(MoveOutcome::SwitchedToRunning(PathBuf::from("/Applications/A.app")).terminates());
        assert!(!MoveOutcome::Declined.terminates());
        assert!(!MoveOutcome::AlreadyInstalled.terminates());
        assert!(!MoveOutcome::Suppressed.terminates());
    }
}
