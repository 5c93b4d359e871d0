//! Scene scanning error types

use thiserror::Error;

/// Errors raised while scanning a scene document or resolving its hierarchy.
///
/// Any of these means the document is internally inconsistent. Callers skip
/// the offending scene and write no output for it; other scenes are
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Boundary line without a parseable `&<id>` token
    #[error("line {line}: malformed record boundary `{text}`")]
    MalformedBoundary { line: usize, text: String },

    /// A record ended (next boundary or end of file) before a required field
    /// was seen
    #[error("record [{id}] near line {line}: missing required field `{field}`")]
    MissingField {
        id: i64,
        line: usize,
        field: &'static str,
    },

    /// A transform's parent id resolves to no node in the scene
    #[error("transform [{id}] references unknown parent [{parent}]")]
    UnknownParent { id: i64, parent: i64 },
}
