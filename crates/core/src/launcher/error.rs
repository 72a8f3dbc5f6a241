//! Error types for the launcher module.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from launching or waiting on the helper.
///
/// This is a closed set: callers match it exhaustively to decide whether a
/// failure is an expected environment gap or a real fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// Helper binary is absent from this environment.
    #[error("Helper binary not found: {program}")]
    BinaryNotFound { program: PathBuf },

    /// Helper exists but may not be executed.
    #[error("Permission denied launching helper: {program}")]
    PermissionDenied { program: PathBuf },

    /// Any other spawn or runtime failure.
    #[error("Helper {program} failed: {detail}")]
    Other { program: PathBuf, detail: String },
}

impl LaunchError {
    /// Classifies an I/O error raised while spawning or waiting on `program`.
    pub fn from_io(program: &Path, err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::BinaryNotFound {
                program: program.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                program: program.to_path_buf(),
            },
            _ => Self::other(program, err.to_string()),
        }
    }

    /// Creates an unclassified failure.
    pub fn other(program: &Path, detail: impl Into<String>) -> Self {
        Self::Other {
            program: program.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// Whether this is the expected "helper not installed" condition.
    pub fn is_missing_binary(&self) -> bool {
        matches!(self, Self::BinaryNotFound { .. })
    }

    /// The program this error refers to.
    pub fn program(&self) -> &Path {
        match self {
            Self::BinaryNotFound { program }
            | Self::PermissionDenied { program }
            | Self::Other { program, .. } => program,
        }
    }
}
