use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No usable Applications folder was found")]
    NoInstallLocation,

    #[error("Administrator install failed ({code}): {message}")]
    ElevatedInstall { code: i32, message: String },

    #[error("Install failed: {0}")]
    InstallFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plist error: {0}")]
    Plist(#[from] plist::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// True for the failures that end a relocation attempt without a retry.
    pub fn is_fatal_install_error(&self) -> bool {
        matches!(
            self,
            AppError::NoInstallLocation
                | AppError::ElevatedInstall { .. }
                | AppError::InstallFailed(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
