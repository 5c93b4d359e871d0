//! Scene audit library
//!
//! Walks a project's scene documents, dumps each scene's object hierarchy,
//! and cross-references script guids against the project's script inventory
//! to report scripts never used by any scene. The binary in `main.rs` is a
//! thin clap wrapper; integration tests drive the functions here directly.

pub mod audit;
pub mod error;
pub mod inventory;
pub mod report;

pub use audit::{AuditArgs, AuditSummary, execute};
pub use error::AuditError;
