//! Error types for `dupguard`
//!
//! Per-file failures never appear here: they are captured as data in
//! [`FileOutcome`](crate::validator::FileOutcome). Only discovery-time and
//! run-level failures alter control flow.

use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `dupguard` runs.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Every discovered file passed
    pub const SUCCESS: i32 = 0;

    /// At least one file failed, no input was discoverable, or an internal error occurred
    pub const FAILURE: i32 = 1;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `dupguard` runs.
#[derive(Debug, Error)]
pub enum DupGuardError {
    /// No candidate files were resolved from the given paths
    #[error("no files to check: none of the given paths resolved to a candidate file")]
    EmptyInput {
        /// Discovery errors recorded for the given paths
        errors: Vec<DiscoveryError>,
    },

    /// Run-level I/O error (writing the report, for example)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DupGuardError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyInput { .. } | Self::Io(_) | Self::Json(_) => ExitCode::FAILURE,
        }
    }
}

// ============================================================================
// Discovery Errors
// ============================================================================

/// Error recorded for a single input path during discovery.
///
/// These are logged and reported but never abort discovery of the
/// remaining paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The input path does not exist
    #[error("path not found: {}", path.display())]
    NotFound {
        /// Path as given on the command line
        path: PathBuf,
    },

    /// The input path exists but cannot be inspected (permission denied, for example)
    #[error("cannot access {}: {message}", path.display())]
    Inaccessible {
        /// Path as given on the command line
        path: PathBuf,
        /// Underlying filesystem error
        message: String,
    },

    /// The directory could not be expanded into a file list
    #[error("cannot expand {}: {message}", path.display())]
    Expand {
        /// Directory being expanded
        path: PathBuf,
        /// Underlying glob or filesystem error
        message: String,
    },
}

impl DiscoveryError {
    /// Returns the input path this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Inaccessible { path, .. } | Self::Expand { path, .. } => {
                path.as_path()
            }
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `dupguard` operations.
pub type Result<T> = std::result::Result<T, DupGuardError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::FAILURE, 1);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_empty_input_exit_code() {
        let err = DupGuardError::EmptyInput { errors: Vec::new() };
        assert_eq!(err.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: DupGuardError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn test_discovery_error_display() {
        let err = DiscoveryError::NotFound {
            path: PathBuf::from("missing/dir"),
        };
        assert_eq!(err.to_string(), "path not found: missing/dir");
        assert_eq!(err.path(), Path::new("missing/dir"));
    }

    #[test]
    fn test_inaccessible_error_display() {
        let err = DiscoveryError::Inaccessible {
            path: PathBuf::from("locked"),
            message: "Permission denied (os error 13)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot access locked: Permission denied (os error 13)"
        );
        assert_eq!(err.path(), Path::new("locked"));
    }

    #[test]
    fn test_expand_error_display() {
        let err = DiscoveryError::Expand {
            path: PathBuf::from("configs"),
            message: "Pattern syntax error".to_string(),
        };
        assert!(err.to_string().contains("configs"));
        assert!(err.to_string().contains("Pattern syntax error"));
    }
}
