use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::detection::{bundle_reader, conflicts, location, target};
use crate::executor::{self, InstallMode};
use crate::models::{
    BundleInfo, ConfirmationText, InstallDecision, InstallTarget, MoveOptions, MoveOutcome,
    RelaunchRequest,
};
use crate::platform::dialog::{default_confirmation_text, ConfirmPrompt};
use crate::platform::{permissions, Host};
use crate::utils::app_lifecycle;
use crate::utils::preferences::PreferenceStore;
use crate::utils::{AppError, AppResult};

static MOVES_IN_PROGRESS: AtomicUsize = AtomicUsize::new(0);

/// True while the bundle is being copied into place.
pub fn is_move_in_progress() -> bool {
    MOVES_IN_PROGRESS.load(Ordering::SeqCst) > 0
}

struct MoveInProgress;

impl MoveInProgress {
    fn begin() -> Self {
        MOVES_IN_PROGRESS.fetch_add(1, Ordering::SeqCst);
        MoveInProgress
    }
}

impl Drop for MoveInProgress {
    fn drop(&mut self) {
        MOVES_IN_PROGRESS.fetch_sub(1, Ordering::SeqCst);
    }
}

fn debug_gate_active(options: &MoveOptions) -> bool {
    options.skip_in_debug_builds && cfg!(debug_assertions)
}

/// Offer to move the running bundle into the Applications folder.
///
/// Returns `Ok(())` when nothing was moved (already installed, declined,
/// suppressed). When the bundle was relocated, or another copy took over,
/// the process exits with status 0 and this function never returns.
pub fn move_to_applications_folder<H, P, T>(
    host: &H,
    prompt: &P,
    options: MoveOptions,
    text: T,
) -> AppResult<()>
where
    H: Host + ?Sized,
    P: ConfirmPrompt + ?Sized,
    T: Fn(bool) -> ConfirmationText,
{
    if debug_gate_active(&options) {
        log::info!("Debug build, not offering to move");
        return Ok(());
    }

    let bundle_path = bundle_reader::current_bundle_path()?;
    let bundle = bundle_reader::read_bundle_lossy(&bundle_path);
    Relocator::new(host, prompt, bundle, options)
        .with_text(text)
        .run_to_completion()
}

/// The move-or-abort flow for one bundle.
pub struct Relocator<'a, H: Host + ?Sized, P: ConfirmPrompt + ?Sized> {
    host: &'a H,
    prompt: &'a P,
    bundle: BundleInfo,
    options: MoveOptions,
    text: Box<dyn Fn(bool) -> ConfirmationText + 'a>,
    preferences: PreferenceStore,
}

impl<'a, H: Host + ?Sized, P: ConfirmPrompt + ?Sized> Relocator<'a, H, P> {
    pub fn new(host: &'a H, prompt: &'a P, bundle: BundleInfo, options: MoveOptions) -> Self {
        let preferences = PreferenceStore::for_bundle(&bundle);
        Self {
            host,
            prompt,
            bundle,
            options,
            text: Box::new(default_confirmation_text),
            preferences,
        }
    }

    pub fn with_text(mut self, text: impl Fn(bool) -> ConfirmationText + 'a) -> Self {
        self.text = Box::new(text);
        self
    }

    pub fn with_preferences(mut self, preferences: PreferenceStore) -> Self {
        self.preferences = preferences;
        self
    }

    /// Run the flow, then exit the process if the outcome calls for it.
    pub fn run_to_completion(&self) -> AppResult<()> {
        let outcome = self.run()?;
        log::info!("Relocation outcome: {:?}", outcome);
        if outcome.terminates() {
            self.host.terminate();
        }
        Ok(())
    }

    /// Run the flow without exiting. Errors are only the fatal ones: no
    /// install location, a failed direct install, a failed elevated install.
    pub fn run(&self) -> AppResult<MoveOutcome> {
        if debug_gate_active(&self.options) {
            return Ok(MoveOutcome::SkippedDebugBuild);
        }

        let mut prefs = self.preferences.load();
        if prefs.alert_suppressed {
            log::info!("Move prompt suppressed by an earlier answer");
            return Ok(MoveOutcome::Suppressed);
        }

        let source = self.bundle.path.as_path();
        if location::is_in_applications_folder(source, &self.host.application_directories()) {
            log::info!("{} is already in an Applications folder", source.display());
            return Ok(MoveOutcome::AlreadyInstalled);
        }

        let destination = loop {
            let target = self.resolve_target()?;
            let destination = target.destination();

            if conflicts::is_running_at(&destination, &self.host.running_bundle_paths()) {
                log::info!("{} is already running, switching to it", destination.display());
                self.switch_to(&destination);
                return Ok(MoveOutcome::SwitchedToRunning(destination));
            }

            if !self.options.replace_newer_versions
                && conflicts::is_newer_installed(&destination, self.bundle.version.as_deref())
            {
                log::info!("{} holds a newer version, switching to it", destination.display());
                self.switch_to(&destination);
                return Ok(MoveOutcome::SwitchedToNewer(destination));
            }

            let needs_authorization =
                permissions::needs_authorization(self.host, &destination, target.directory());

            let answer = self.prompt.confirm(&(self.text)(needs_authorization));
            if answer.suppress_future_prompts {
                prefs.alert_suppressed = true;
                if let Err(e) = self.preferences.save(&prefs) {
                    log::warn!("Could not remember the suppression choice: {}", e);
                }
            }
            if !answer.accepted {
                log::info!("User chose not to move");
                return Ok(MoveOutcome::Declined);
            }

            let decision = {
                let _in_progress = MoveInProgress::begin();
                executor::install(
                    self.host,
                    source,
                    &destination,
                    InstallMode::for_authorization(needs_authorization),
                )?
            };

            match decision {
                InstallDecision::Success => break destination,
                InstallDecision::Cancelled => {
                    log::info!("Authentication cancelled, asking again");
                    continue;
                }
                InstallDecision::Failed { code, message } => {
                    return Err(AppError::ElevatedInstall { code, message });
                }
            }
        };

        let detach_device = self.host.disk_image_device(source);
        self.remove_original(source, &destination, detach_device.is_some());

        let request = RelaunchRequest {
            pid: self.host.current_pid(),
            destination: destination.clone(),
            detach_device,
        };
        if let Err(e) = app_lifecycle::schedule_relaunch(self.host, &request) {
            log::error!("Could not schedule relaunch of {}: {}", destination.display(), e);
        }

        Ok(MoveOutcome::Relocated(destination))
    }

    /// Computed fresh on every attempt.
    fn resolve_target(&self) -> AppResult<InstallTarget> {
        let directory = target::resolve_install_directory(
            &self.host.application_directories(),
            &self.host.protected_directory(),
        )
        .ok_or(AppError::NoInstallLocation)?;
        Ok(InstallTarget::new(
            directory,
            self.options.name_strategy.resolve(&self.bundle),
        ))
    }

    fn switch_to(&self, destination: &Path) {
        if let Err(e) = self.host.open(destination) {
            log::error!("Could not open {}: {}", destination.display(), e);
        }
    }

    /// Best effort: failures are logged, never surfaced.
    fn remove_original(&self, source: &Path, destination: &Path, on_disk_image: bool) {
        if on_disk_image {
            log::info!("Original is on a disk image, it will be ejected after relaunch");
            return;
        }
        if !destination.exists() {
            log::warn!(
                "Keeping {} because {} is missing",
                source.display(),
                destination.display()
            );
            return;
        }
        match self.host.move_to_trash(source) {
            Ok(()) => log::info!("Moved original {} to Trash", source.display()),
            Err(e) => log::warn!("Could not trash original {}: {}", source.display(), e),
        }
    }
}
