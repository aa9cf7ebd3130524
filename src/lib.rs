pub mod commands;
pub mod detection;
pub mod executor;
pub mod models;
pub mod platform;
pub mod utils;

#[cfg(test)]
mod test_support;

use std::path::Path;

pub use commands::{is_move_in_progress, move_to_applications_folder, Relocator};
pub use models::{ConfirmationText, MoveOptions, MoveOutcome, NameStrategy};
pub use platform::dialog::{default_confirmation_text, ConfirmPrompt, DialogPrompt};
pub use platform::{Host, MacHost};
pub use utils::{AppError, AppResult};

/// Load `MoveOptions` from a JSON file. Missing fields take their defaults.
pub fn load_options(path: &Path) -> AppResult<MoveOptions> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Custom(format!("Invalid options in {}: {}", path.display(), e)))
}

pub fn run() {
    env_logger::init();

    let options = match std::env::args_os().nth(1) {
        Some(path) => match load_options(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => MoveOptions::default(),
    };

    if let Err(e) =
        move_to_applications_folder(&MacHost, &DialogPrompt, options, default_confirmation_text)
    {
        if e.is_fatal_install_error() {
            log::error!("Could not move to the Applications folder: {}", e);
        } else {
            log::error!("Relocation did not start: {}", e);
        }
        std::process::exit(1);
    }
}
