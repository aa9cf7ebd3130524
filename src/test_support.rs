//! In-memory stand-ins for the OS collaborators, backed by a temp directory.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Confirmation, ConfirmationText, InstallDecision};
use crate::platform::dialog::ConfirmPrompt;
use crate::platform::{permissions, Host};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(PathBuf),
    Trash(PathBuf),
    Copy(PathBuf, PathBuf),
    ClearQuarantine(PathBuf),
    Elevated(String),
    Spawn(String),
}

pub struct FakeHost {
    root: PathBuf,
    running: RefCell<Vec<PathBuf>>,
    locked: RefCell<Vec<PathBuf>>,
    elevation: RefCell<VecDeque<InstallDecision>>,
    calls: RefCell<Vec<Call>>,
    disk_image: RefCell<Option<String>>,
    fail_copy: Cell<bool>,
    fail_trash: Cell<bool>,
    fail_spawn: Cell<bool>,
    skip_copy: Cell<bool>,
}

impl FakeHost {
    /// Lays out `<root>/Applications` (populated) and `<root>/System/Applications`.
    pub fn new(root: &Path) -> Self {
        let host = Self {
            root: root.to_path_buf(),
            running: RefCell::new(Vec::new()),
            locked: RefCell::new(Vec::new()),
            elevation: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
            disk_image: RefCell::new(None),
            fail_copy: Cell::new(false),
            fail_trash: Cell::new(false),
            fail_spawn: Cell::new(false),
            skip_copy: Cell::new(false),
        };
        fs::create_dir_all(host.local_apps().join("Safari.app")).unwrap();
        fs::create_dir_all(host.local_apps().join("Mail.app")).unwrap();
        fs::create_dir_all(host.system_apps().join("Calculator.app")).unwrap();
        host
    }

    pub fn user_apps(&self) -> PathBuf {
        self.root.join("home/Applications")
    }

    pub fn local_apps(&self) -> PathBuf {
        self.root.join("Applications")
    }

    pub fn system_apps(&self) -> PathBuf {
        self.root.join("System/Applications")
    }

    pub fn trash_dir(&self) -> PathBuf {
        self.root.join(".Trash")
    }

    pub fn set_running(&self, path: &Path) {
        self.running.borrow_mut().push(path.to_path_buf());
    }

    pub fn lock_path(&self, path: &Path) {
        self.locked.borrow_mut().push(path.to_path_buf());
    }

    pub fn push_elevation(&self, decision: InstallDecision) {
        self.elevation.borrow_mut().push_back(decision);
    }

    pub fn set_disk_image(&self, device: &str) {
        *self.disk_image.borrow_mut() = Some(device.to_string());
    }

    pub fn fail_copy(&self) {
        self.fail_copy.set(true);
    }

    pub fn fail_trash(&self) {
        self.fail_trash.set(true);
    }

    /// Copies (direct or elevated) report success but write nothing.
    pub fn skip_copy(&self) {
        self.skip_copy.set(true);
    }

    pub fn fail_spawn(&self) {
        self.fail_spawn.set(true);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn trashed(&self, path: &Path) -> bool {
        self.calls().contains(&Call::Trash(path.to_path_buf()))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn copy_tree(source: &Path, destination: &Path) -> std::io::Result<()> {
    fs::create_dir_all(destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// Act out the `rm` + `ditto` pair of an elevated install script. Test paths
/// never need quoting, so splitting on whitespace is enough.
fn simulate_elevated_copy(shell_cmd: &str) {
    let tokens: Vec<&str> = shell_cmd.split_whitespace().collect();
    if let Some(i) = tokens.iter().position(|t| *t == "/usr/bin/ditto") {
        let (source, destination) = (Path::new(tokens[i + 1]), Path::new(tokens[i + 2]));
        let _ = fs::remove_dir_all(destination);
        copy_tree(source, destination).unwrap();
    }
}

impl Host for FakeHost {
    fn application_directories(&self) -> Vec<PathBuf> {
        vec![
            self.user_apps(),
            self.local_apps(),
            self.root.join("Network/Applications"),
            self.system_apps(),
        ]
    }

    fn protected_directory(&self) -> PathBuf {
        self.system_apps()
    }

    fn running_bundle_paths(&self) -> Vec<PathBuf> {
        self.running.borrow().clone()
    }

    fn is_writable(&self, path: &Path) -> bool {
        !self.locked.borrow().iter().any(|p| p == path) && permissions::is_writable(path)
    }

    fn open(&self, path: &Path) -> AppResult<()> {
        self.record(Call::Open(path.to_path_buf()));
        Ok(())
    }

    fn move_to_trash(&self, path: &Path) -> AppResult<()> {
        self.record(Call::Trash(path.to_path_buf()));
        if self.fail_trash.get() {
            return Err(AppError::CommandFailed("Finder trash failed".into()));
        }
        let trash = self.trash_dir();
        fs::create_dir_all(&trash)?;
        let name = format!(
            "{}-{}",
            self.calls.borrow().len(),
            path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
        );
        fs::rename(path, trash.join(name))?;
        Ok(())
    }

    fn copy_bundle(&self, source: &Path, destination: &Path) -> AppResult<()> {
        self.record(Call::Copy(source.to_path_buf(), destination.to_path_buf()));
        if self.fail_copy.get() {
            return Err(AppError::CommandFailed("ditto failed: disk full".into()));
        }
        if !self.skip_copy.get() {
            copy_tree(source, destination)?;
        }
        Ok(())
    }

    fn clear_quarantine(&self, path: &Path) -> AppResult<()> {
        self.record(Call::ClearQuarantine(path.to_path_buf()));
        Ok(())
    }

    fn run_elevated(&self, shell_cmd: &str) -> InstallDecision {
        self.record(Call::Elevated(shell_cmd.to_string()));
        let decision = self
            .elevation
            .borrow_mut()
            .pop_front()
            .unwrap_or(InstallDecision::Success);
        if decision == InstallDecision::Success && !self.skip_copy.get() {
            simulate_elevated_copy(shell_cmd);
        }
        decision
    }

    fn spawn_detached(&self, shell_cmd: &str) -> AppResult<()> {
        self.record(Call::Spawn(shell_cmd.to_string()));
        if self.fail_spawn.get() {
            return Err(AppError::CommandFailed("Failed to spawn watcher".into()));
        }
        Ok(())
    }

    fn disk_image_device(&self, _path: &Path) -> Option<String> {
        self.disk_image.borrow().clone()
    }

    fn current_pid(&self) -> u32 {
        4242
    }

    fn terminate(&self) -> ! {
        panic!("terminated with status 0");
    }
}

/// Answers confirmations from a queue and remembers what it was shown.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<Confirmation>>,
    shown: RefCell<Vec<ConfirmationText>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: impl IntoIterator<Item = Confirmation>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            shown: RefCell::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<ConfirmationText> {
        self.shown.borrow().clone()
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&self, text: &ConfirmationText) -> Confirmation {
        self.shown.borrow_mut().push(text.clone());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(Confirmation::decline)
    }
}
