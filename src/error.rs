/*!
 * Error types for Fizzz
 */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::filter::FilterError;

pub type Result<T> = std::result::Result<T, FizzzError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum FizzzError {
    /// Source directory not found
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Source exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Fewer files than requested bins
    #[error("Only {files} file(s) found, cannot split into {bins} directories")]
    InsufficientFiles { files: usize, bins: usize },

    /// Destination subdirectory already exists
    #[error("Destination directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid exclusion pattern
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Metadata operation failed
    #[error("Metadata operation failed: {0}")]
    MetadataFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FizzzError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }

    /// Remediation hint shown alongside the error message
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            FizzzError::SourceNotFound(_) | FizzzError::InvalidPath(_) => {
                Some("Check the path passed with -d/--srcdir")
            }
            FizzzError::InsufficientFiles { .. } => {
                Some("Use fewer directories (-n) or add more files to the source directory")
            }
            FizzzError::AlreadyExists(_) => {
                Some("Remove the existing directories, choose another prefix (-p), or pass --force")
            }
            FizzzError::Filter(_) => Some("Check the patterns passed with --exclude"),
            FizzzError::Config(_)
            | FizzzError::MetadataFailed(_)
            | FizzzError::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let errors = vec![
            FizzzError::SourceNotFound(PathBuf::from("/missing")),
            FizzzError::InvalidPath(PathBuf::from("/file")),
            FizzzError::InsufficientFiles { files: 1, bins: 4 },
            FizzzError::AlreadyExists(PathBuf::from("processor0")),
            FizzzError::Config("bad".to_string()),
            FizzzError::MetadataFailed("times".to_string()),
            FizzzError::Io(io::Error::new(io::ErrorKind::Other, "boom")),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), EXIT_FAILURE, "{}", err);
        }
    }

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(EXIT_SUCCESS, 0);
        assert_eq!(EXIT_FAILURE, 1);
    }

    #[test]
    fn test_error_display() {
        let err = FizzzError::InsufficientFiles { files: 2, bins: 3 };
        assert_eq!(
            err.to_string(),
            "Only 2 file(s) found, cannot split into 3 directories"
        );

        let err = FizzzError::SourceNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Source directory not found: /nope");

        let err = FizzzError::AlreadyExists(PathBuf::from("out/processor1"));
        assert!(err.to_string().contains("processor1"));
    }

    #[test]
    fn test_suggestions() {
        assert!(FizzzError::InsufficientFiles { files: 0, bins: 1 }
            .suggestion()
            .unwrap()
            .contains("-n"));
        assert!(FizzzError::AlreadyExists(PathBuf::from("x"))
            .suggestion()
            .unwrap()
            .contains("--force"));
        assert!(FizzzError::Config("x".into()).suggestion().is_none());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: FizzzError = io_err.into();
        assert!(matches!(err, FizzzError::Io(_)));
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let err = FizzzError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());

        let err = FizzzError::Config("x".into());
        assert!(err.source().is_none());
    }
}
