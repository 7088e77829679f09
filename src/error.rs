//! Unified error types for sampleshift
//!
//! Error strategy: every error is fatal. The batch stops at the first
//! failure and nothing after it is attempted.

use std::path::PathBuf;
use thiserror::Error;

/// Audio formats accepted as input, for error messages
pub const SUPPORTED_FORMATS: &str = "WAV, MP3, OGG, FLAC, M4A, AIFF";

/// Top-level error type for sampleshift operations
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("No audio files found in {}", .dir.display())]
    NoInputFiles { dir: PathBuf },

    #[error("Failed to decode audio file '{path}': {reason}\n  Supported formats: {SUPPORTED_FORMATS}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Resampling failed: {reason}")]
    ResampleError { reason: String },

    #[error("Pitch shift failed for '{path}': {reason}")]
    ShiftFailed { path: PathBuf, reason: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sampleshift operations
pub type Result<T> = std::result::Result<T, ShiftError>;

impl ShiftError {
    /// Create a decode error with context about the issue
    pub fn decode_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ShiftError::DecodeError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn resample_error(reason: impl std::fmt::Display) -> Self {
        ShiftError::ResampleError {
            reason: reason.to_string(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent().map(|p| p.display().to_string()).unwrap_or_default()
                )
            }
            _ => err.to_string(),
        };
        ShiftError::OutputError { path, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_no_input_message_names_directory() {
        let err = ShiftError::NoInputFiles {
            dir: PathBuf::from("/samples/Piano"),
        };
        assert_eq!(err.to_string(), "No audio files found in /samples/Piano");
    }

    #[test]
    fn test_output_error_permission_denied() {
        let err = ShiftError::output_error(
            "/locked/C4_p12.wav",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        match err {
            ShiftError::OutputError { reason, .. } => {
                assert!(reason.starts_with("Permission denied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_output_error_missing_parent() {
        let err = ShiftError::output_error(
            "/missing/dir/C4_m12.wav",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/missing/dir"));
    }
}
