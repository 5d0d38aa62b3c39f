use std::path::PathBuf;
use thiserror::Error;

/// Failures of a detection run.
///
/// "No stack detected" is not an error: the registry reports it as an empty
/// result.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// A file known to exist could not be read or decoded.
    #[error("evidence unreadable: {path}: {reason}")]
    EvidenceUnreadable { path: PathBuf, reason: String },

    /// A detector produced a profile that breaks its own invariants.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("detection cancelled")]
    Cancelled,

    #[error("detection deadline exceeded")]
    DeadlineExceeded,

    #[error("cannot access path {0:?}")]
    PathNotFound(PathBuf),

    #[error("path {0:?} is not a directory")]
    NotADirectory(PathBuf),
}

impl DetectionError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::EvidenceUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = DetectionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_display() {
        let err = DetectionError::unreadable("package.json", "EOF while parsing an object");
        assert_eq!(
            err.to_string(),
            "evidence unreadable: package.json: EOF while parsing an object"
        );
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(DetectionError::Cancelled.to_string(), "detection cancelled");
    }
}
