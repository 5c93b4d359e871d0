//! Scene-Scan: record scanner and hierarchy reconstruction for Unity-style
//! scene documents
//!
//! This crate reads the restricted, line-oriented YAML dialect used by scene
//! files without a generic YAML parser. It recognizes exactly the record
//! boundaries and field lines the audit pipeline consumes and ignores
//! everything else, which keeps it robust against format churn in fields it
//! never looks at.
//!
//! # Key Features
//!
//! - **Line-prefix recognition**: records and fields are matched by exact
//!   prefixes, never by structural parsing
//! - **Two-pass linking**: records are collected flat, then resolved into a
//!   rooted tree, so forward references cost nothing
//! - **Pure**: content in, typed records out; no filesystem access, no logging
//!
//! # Document Format Overview
//!
//! A scene document is a sequence of records. Each record starts with a
//! boundary line declaring its kind and id, followed by indented field lines:
//!
//! ```text
//! --- !u!1 &100
//! GameObject:
//!   m_Name: Player
//! --- !u!4 &4
//! Transform:
//!   m_GameObject: {fileID: 100}
//!   m_Father: {fileID: 0}
//! --- !u!114 &200
//! MonoBehaviour:
//!   m_Script: {fileID: 11500000, guid: 0b84..., type: 3}
//! ```
//!
//! Kind 1 is an object, kind 4 a hierarchy node, kind 114 a script behavior.
//! All other kinds are skipped as opaque blocks.
//!
//! # Usage
//!
//! ```ignore
//! use scene_scan::{build_tree, scan_scene};
//!
//! let content = std::fs::read_to_string("Level1.unity").unwrap();
//! let records = scan_scene(&content).unwrap();
//! let tree = build_tree(&records).unwrap();
//!
//! for (depth, name) in tree.walk() {
//!     println!("{}{}", "--".repeat(depth), name);
//! }
//! ```

mod error;
mod hierarchy;
mod inventory;
mod record;
mod scanner;

pub use error::SceneError;
pub use hierarchy::{SceneTree, TreeNode, build_tree};
pub use inventory::{
    SERIALIZED_FIELD_MARKER, ScriptEntry, ScriptInventory, has_serialized_state, meta_guid,
    meta_path,
};
pub use record::{BehaviorRef, ObjectRecord, SceneRecords, TransformRecord};
pub use scanner::scan_scene;

// =============================================================================
// Record Boundaries
// =============================================================================

/// Prefix shared by every record boundary line
pub const BOUNDARY_PREFIX: &str = "--- !u!";

/// Object record boundary. The trailing space is significant: without it
/// `!u!1` would also match `!u!114` boundaries.
pub const OBJECT_BOUNDARY: &str = "--- !u!1 ";

/// Transform (hierarchy node) record boundary
pub const TRANSFORM_BOUNDARY: &str = "--- !u!4 ";

/// Behavior (attached script) record boundary
pub const BEHAVIOR_BOUNDARY: &str = "--- !u!114 ";

// =============================================================================
// Field Prefixes
// =============================================================================

/// Name field of an object record
pub const NAME_FIELD: &str = "  m_Name: ";

/// Owning-object reference field of a transform record
pub const OWNER_FIELD: &str = "  m_GameObject: {fileID: ";

/// Parent reference field of a transform record
pub const PARENT_FIELD: &str = "  m_Father: {fileID: ";

/// Script reference field of a behavior record
pub const SCRIPT_FIELD: &str = "  m_Script: {fileID: ";

// =============================================================================
// Hierarchy Constants
// =============================================================================

/// Id of the synthetic root node. Top-level transforms carry this as their
/// parent reference in the document itself.
pub const ROOT_ID: i64 = 0;

/// Display name of the synthetic root node
pub const ROOT_NAME: &str = "*ROOT*";

// =============================================================================
// Tests
// =============================================================================
