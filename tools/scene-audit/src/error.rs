//! Audit error taxonomy
//!
//! Structural errors inside a single scene are handled within the run (the
//! scene is skipped, the run continues). The variants here are the
//! run-aborting classes, each mapped to its own process exit code so callers
//! can tell the failure classes apart.

use std::path::PathBuf;
use thiserror::Error;

/// Run-aborting audit failures
#[derive(Debug, Error)]
pub enum AuditError {
    /// A required directory is absent
    #[error("path error: {} does not exist", .0.display())]
    MissingDir(PathBuf),

    /// Underlying filesystem failure (permissions, disk)
    #[error("path error: {}: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A script has no readable companion metadata file
    #[error("inventory error: {}: meta file missing or unreadable", .0.display())]
    MissingMeta(PathBuf),

    /// A script's metadata carries no guid entry
    #[error("inventory error: {}: no guid entry", .0.display())]
    MissingGuid(PathBuf),
}

impl AuditError {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            AuditError::MissingDir(_) | AuditError::Path { .. } => 3,
            AuditError::MissingMeta(_) | AuditError::MissingGuid(_) => 4,
        }
    }
}
