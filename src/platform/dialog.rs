use std::process::Command;

use crate::models::{Confirmation, ConfirmationText};
use crate::utils::applescript_quote;

/// Asks the user whether to move the application.
pub trait ConfirmPrompt {
    fn confirm(&self, text: &ConfirmationText) -> Confirmation;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&ConfirmationText) -> Confirmation,
{
    fn confirm(&self, text: &ConfirmationText) -> Confirmation {
        self(text)
    }
}

/// Stock wording. The body mentions the password prompt when elevation is needed.
pub fn default_confirmation_text(needs_authentication: bool) -> ConfirmationText {
    let mut body = String::from("I can move myself to the Applications folder if you'd like.");
    if needs_authentication {
        body.push_str(" Note that this will require an administrator password.");
    } else {
        body.push_str(" This will keep your Downloads folder uncluttered.");
    }

    ConfirmationText {
        title: "Move to Applications folder?".to_string(),
        body,
        accept_label: "Move to Applications Folder".to_string(),
        decline_label: "Do Not Move".to_string(),
    }
}

/// Native dialog shown through `osascript display dialog`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPrompt;

impl ConfirmPrompt for DialogPrompt {
    fn confirm(&self, text: &ConfirmationText) -> Confirmation {
        let output = Command::new("osascript")
            .current_dir("/tmp")
            .args(["-e", &dialog_script(text)])
            .output();

        match output {
            Ok(o) if o.status.success() => {
                parse_dialog_answer(&String::from_utf8_lossy(&o.stdout), &text.accept_label)
            }
            // "User canceled" (-128) lands here when the decline button is the cancel button.
            Ok(o) => {
                log::debug!("dialog dismissed: {}", String::from_utf8_lossy(&o.stderr).trim());
                Confirmation::decline()
            }
            Err(e) => {
                log::warn!("Could not show confirmation dialog: {}", e);
                Confirmation::decline()
            }
        }
    }
}

pub fn dialog_script(text: &ConfirmationText) -> String {
    let accept = applescript_quote(&text.accept_label);
    let decline = applescript_quote(&text.decline_label);
    format!(
        "display dialog \"{body}\" with title \"{title}\" buttons {{\"{decline}\", \"{accept}\"}} default button \"{accept}\" cancel button \"{decline}\"",
        body = applescript_quote(&text.body),
        title = applescript_quote(&text.title),
        decline = decline,
        accept = accept,
    )
}

/// osascript prints `button returned:<label>`.
pub fn parse_dialog_answer(stdout: &str, accept_label: &str) -> Confirmation {
    let pressed = stdout
        .trim()
        .split(',')
        .find_map(|part| part.trim().strip_prefix("button returned:"));
    if pressed == Some(accept_label) {
        Confirmation::accept()
    } else {
        Confirmation::decline()
    }
}
