// Central Error Type for the Application

use thiserror::Error;

use crate::domain::PlatformKind;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(PlatformKind),

    #[error("Process listing error: {0}")]
    Listing(#[from] crate::port::ListError),

    #[error("Introspection error: {0}")]
    Adapter(#[from] crate::port::AdapterError),

    #[error("Launch error: {0}")]
    Launch(#[from] crate::port::LaunchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
