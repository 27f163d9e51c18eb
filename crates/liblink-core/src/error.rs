use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("home directory not found: set HOME or LIBLINK_CONFIG_DIR")]
    HomeNotFound,

    #[error("missing required path '{field}': pass --{field} or run without --non-interactive")]
    MissingRequiredPath { field: &'static str },

    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("additional path not found: {0} (use --skip-missing-paths to skip)")]
    MissingAdditionalPath(PathBuf),

    #[error("no package manager found: install npm, yarn, or pnpm, or pass --package-manager")]
    NoPackageManager,

    #[error("command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
