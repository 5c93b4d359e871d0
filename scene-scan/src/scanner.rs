//! Line-oriented record scanner
//!
//! Turns one scene document into its recognized records. Each record kind is
//! scanned by a small state machine that seeks the kind's required fields and
//! stops at the next record boundary, so a missing field is detected at the
//! exact record it belongs to and a field line can never be attributed to a
//! record of the wrong kind.

use std::iter::Peekable;
use std::str::Lines;

use crate::error::SceneError;
use crate::record::{BehaviorRef, ObjectRecord, SceneRecords, TransformRecord};
use crate::{
    BEHAVIOR_BOUNDARY, BOUNDARY_PREFIX, NAME_FIELD, OBJECT_BOUNDARY, OWNER_FIELD, PARENT_FIELD,
    SCRIPT_FIELD, TRANSFORM_BOUNDARY,
};

/// Scan one scene document into its recognized records.
///
/// Record order follows document order. Lines outside any recognized record
/// or field prefix are ignored.
pub fn scan_scene(content: &str) -> Result<SceneRecords, SceneError> {
    Scanner::new(content).run()
}

struct Scanner<'a> {
    lines: Peekable<Lines<'a>>,
    /// 1-based number of the last line consumed
    line_no: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().peekable(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }

    /// Whether the next line starts a new record. Peeks only: the boundary
    /// line must stay in the stream so the outer loop can open the next
    /// record from it.
    fn at_boundary(&mut self) -> bool {
        matches!(self.lines.peek(), Some(l) if l.starts_with(BOUNDARY_PREFIX))
    }

    fn run(mut self) -> Result<SceneRecords, SceneError> {
        let mut records = SceneRecords::default();

        while let Some(line) = self.next_line() {
            if !line.starts_with(BOUNDARY_PREFIX) {
                // Preamble, or leftover field lines of a record whose state
                // machine already finished.
                continue;
            }

            if line.starts_with(OBJECT_BOUNDARY) {
                let id = self.boundary_id(line)?;
                records.objects.push(self.scan_object(id));
            } else if line.starts_with(TRANSFORM_BOUNDARY) {
                let id = self.boundary_id(line)?;
                records.transforms.push(self.scan_transform(id)?);
            } else if line.starts_with(BEHAVIOR_BOUNDARY) {
                let id = self.boundary_id(line)?;
                records.behaviors.push(self.scan_behavior(id)?);
            } else {
                self.skip_record();
            }
        }

        Ok(records)
    }

    /// Extract the record id from a boundary line: `--- !u!4 &42` -> 42.
    /// Trailing tokens after the id (e.g. `stripped`) are allowed.
    fn boundary_id(&self, line: &str) -> Result<i64, SceneError> {
        let malformed = || SceneError::MalformedBoundary {
            line: self.line_no,
            text: line.to_string(),
        };

        let token = line.split_whitespace().nth(2).ok_or_else(malformed)?;
        token
            .strip_prefix('&')
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(malformed)
    }

    /// Object record: seek `m_Name`. The name is optional; an object whose
    /// record ends without one simply stays unnamed.
    fn scan_object(&mut self, id: i64) -> ObjectRecord {
        let mut name = None;
        while !self.at_boundary() {
            let Some(line) = self.next_line() else { break };
            if let Some(value) = line.strip_prefix(NAME_FIELD) {
                name = Some(value.trim().to_string());
                break;
            }
        }
        ObjectRecord { id, name }
    }

    /// Transform record: seek `m_GameObject` and `m_Father`. Both are
    /// required; the node cannot be linked without them.
    fn scan_transform(&mut self, id: i64) -> Result<TransformRecord, SceneError> {
        let mut owner = None;
        let mut parent = None;

        while owner.is_none() || parent.is_none() {
            if self.at_boundary() {
                break;
            }
            let Some(line) = self.next_line() else { break };

            if let Some(rest) = line.strip_prefix(OWNER_FIELD) {
                if owner.is_none() {
                    owner = braced_id(rest);
                }
            } else if let Some(rest) = line.strip_prefix(PARENT_FIELD) {
                if parent.is_none() {
                    parent = braced_id(rest);
                }
            }
        }

        let missing = |field| SceneError::MissingField {
            id,
            line: self.line_no,
            field,
        };
        Ok(TransformRecord {
            id,
            owner: owner.ok_or_else(|| missing("m_GameObject"))?,
            parent: parent.ok_or_else(|| missing("m_Father"))?,
        })
    }

    /// Behavior record: seek the `m_Script` reference and extract its guid.
    fn scan_behavior(&mut self, id: i64) -> Result<BehaviorRef, SceneError> {
        while !self.at_boundary() {
            let Some(line) = self.next_line() else { break };
            if line.starts_with(SCRIPT_FIELD) {
                match script_guid(line) {
                    Some(guid) => {
                        return Ok(BehaviorRef {
                            guid: guid.to_string(),
                        });
                    }
                    // An m_Script line that is not the full three-field
                    // reference (e.g. a null `{fileID: 0}`) carries no guid.
                    None => break,
                }
            }
        }
        Err(SceneError::MissingField {
            id,
            line: self.line_no,
            field: "m_Script",
        })
    }

    /// Unrecognized record kind: consume its field lines without
    /// interpreting them.
    fn skip_record(&mut self) {
        while !self.at_boundary() {
            if self.next_line().is_none() {
                break;
            }
        }
    }
}

/// Extract the integer from the tail of a `{fileID: <n>}` reference, with
/// the trailing brace stripped: `"100}"` -> 100.
fn braced_id(rest: &str) -> Option<i64> {
    rest.trim_end().trim_end_matches('}').trim().parse().ok()
}

/// Extract the guid from a full `m_Script: {fileID: <n>, guid: <g>, type: <t>}`
/// reference. Exactly the three-field bracketed form matches; anything short
/// of it yields nothing.
fn script_guid(line: &str) -> Option<&str> {
    let body = line.strip_prefix(SCRIPT_FIELD)?.trim_end().strip_suffix('}')?;

    let mut fields = body.split(", ");
    let file_id = fields.next()?;
    let guid = fields.next()?.strip_prefix("guid: ")?;
    let ty = fields.next()?.strip_prefix("type: ")?;

    let well_formed = fields.next().is_none()
        && file_id.parse::<i64>().is_ok()
        && ty.parse::<i64>().is_ok()
        && !guid.is_empty();
    well_formed.then_some(guid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUID: &str = "0b84f821ec2a4f54a9a811e2e7b1efa9";

    fn scene(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_object_and_transform_records() {
        let content = scene(&[
            "%YAML 1.1",
            "%TAG !u! tag:unity3d.com,2011:",
            "--- !u!1 &100",
            "GameObject:",
            "  m_ObjectHideFlags: 0",
            "  m_Name: Player",
            "  m_IsActive: 1",
            "--- !u!4 &4",
            "Transform:",
            "  m_GameObject: {fileID: 100}",
            "  m_LocalPosition: {x: 0, y: 0, z: 0}",
            "  m_Father: {fileID: 0}",
            "  m_RootOrder: 0",
        ]);

        let records = scan_scene(&content).unwrap();
        assert_eq!(records.objects.len(), 1);
        assert_eq!(records.objects[0].id, 100);
        assert_eq!(records.objects[0].name.as_deref(), Some("Player"));

        assert_eq!(records.transforms.len(), 1);
        assert_eq!(
            records.transforms[0],
            TransformRecord {
                id: 4,
                owner: 100,
                parent: 0,
            }
        );
    }

    #[test]
    fn test_name_value_is_trimmed() {
        let content = scene(&["--- !u!1 &100", "GameObject:", "  m_Name:   Main Camera  "]);
        let records = scan_scene(&content).unwrap();
        assert_eq!(records.objects[0].name.as_deref(), Some("Main Camera"));
    }

    #[test]
    fn test_object_without_name_stays_unnamed() {
        let content = scene(&[
            "--- !u!1 &100",
            "GameObject:",
            "  m_ObjectHideFlags: 0",
            "--- !u!1 &200",
            "GameObject:",
            "  m_Name: Second",
        ]);

        let records = scan_scene(&content).unwrap();
        assert_eq!(records.objects[0].name, None);
        assert_eq!(records.objects[1].name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_unknown_record_kinds_are_skipped_opaquely() {
        // The skipped kind-104 block contains lines that look like transform
        // fields; none of them may leak into another record.
        let content = scene(&[
            "--- !u!104 &2",
            "RenderSettings:",
            "  m_GameObject: {fileID: 999}",
            "  m_Father: {fileID: 999}",
            "  m_Name: NotAnObject",
            "--- !u!1 &100",
            "GameObject:",
            "  m_Name: Player",
        ]);

        let records = scan_scene(&content).unwrap();
        assert_eq!(records.objects.len(), 1);
        assert_eq!(records.objects[0].name.as_deref(), Some("Player"));
        assert!(records.transforms.is_empty());
    }

    #[test]
    fn test_behavior_boundary_is_not_an_object_boundary() {
        // `--- !u!114` starts with `--- !u!1`; only the trailing space in the
        // object boundary keeps the kinds apart.
        let content = scene(&[
            "--- !u!114 &200",
            "MonoBehaviour:",
            &format!("  m_Script: {{fileID: 11500000, guid: {GUID}, type: 3}}"),
        ]);

        let records = scan_scene(&content).unwrap();
        assert!(records.objects.is_empty());
        assert_eq!(records.behaviors.len(), 1);
        assert_eq!(records.behaviors[0].guid, GUID);
    }

    #[test]
    fn test_transform_missing_father_is_an_error() {
        let content = scene(&[
            "--- !u!4 &4",
            "Transform:",
            "  m_GameObject: {fileID: 100}",
            "--- !u!1 &100",
            "GameObject:",
            "  m_Name: Player",
        ]);

        let err = scan_scene(&content).unwrap_err();
        assert_eq!(
            err,
            SceneError::MissingField {
                id: 4,
                line: 3,
                field: "m_Father",
            }
        );
    }

    #[test]
    fn test_transform_missing_owner_is_an_error() {
        let content = scene(&["--- !u!4 &4", "Transform:", "  m_Father: {fileID: 0}"]);
        let err = scan_scene(&content).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MissingField {
                id: 4,
                field: "m_GameObject",
                ..
            }
        ));
    }

    #[test]
    fn test_behavior_guid_extraction() {
        let content = scene(&[
            "--- !u!114 &200",
            "MonoBehaviour:",
            "  m_GameObject: {fileID: 100}",
            "  m_Enabled: 1",
            &format!("  m_Script: {{fileID: 11500000, guid: {GUID}, type: 3}}"),
            "  m_EditorClassIdentifier: ",
        ]);

        let records = scan_scene(&content).unwrap();
        assert_eq!(records.behaviors.len(), 1);
        assert_eq!(records.behaviors[0].guid, GUID);
    }

    #[test]
    fn test_null_script_reference_is_an_error() {
        let content = scene(&[
            "--- !u!114 &200",
            "MonoBehaviour:",
            "  m_Script: {fileID: 0}",
        ]);

        let err = scan_scene(&content).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MissingField {
                id: 200,
                field: "m_Script",
                ..
            }
        ));
    }

    #[test]
    fn test_behavior_without_script_field_is_an_error() {
        let content = scene(&["--- !u!114 &200", "MonoBehaviour:", "  m_Enabled: 1"]);
        let err = scan_scene(&content).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MissingField {
                id: 200,
                field: "m_Script",
                ..
            }
        ));
    }

    #[test]
    fn test_boundary_with_stripped_suffix() {
        let content = scene(&["--- !u!1 &100 stripped", "GameObject:", "  m_Name: Proxy"]);
        let records = scan_scene(&content).unwrap();
        assert_eq!(records.objects[0].id, 100);
    }

    #[test]
    fn test_malformed_boundary_is_an_error() {
        let content = scene(&["--- !u!4 fileID", "Transform:"]);
        let err = scan_scene(&content).unwrap_err();
        assert!(matches!(err, SceneError::MalformedBoundary { line: 1, .. }));
    }

    #[test]
    fn test_leftover_field_lines_are_ignored() {
        // The transform state machine stops once both fields are found; the
        // record's remaining lines must not be interpreted.
        let content = scene(&[
            "--- !u!4 &4",
            "Transform:",
            "  m_GameObject: {fileID: 100}",
            "  m_Father: {fileID: 0}",
            "  m_Name: Junk",
        ]);

        let records = scan_scene(&content).unwrap();
        assert_eq!(records.transforms.len(), 1);
        assert!(records.objects.is_empty());
    }

    #[test]
    fn test_records_keep_document_order() {
        let content = scene(&[
            "--- !u!4 &7",
            "Transform:",
            "  m_GameObject: {fileID: 300}",
            "  m_Father: {fileID: 0}",
            "--- !u!1 &300",
            "GameObject:",
            "  m_Name: B",
            "--- !u!4 &8",
            "Transform:",
            "  m_GameObject: {fileID: 400}",
            "  m_Father: {fileID: 0}",
        ]);

        let records = scan_scene(&content).unwrap();
        let ids: Vec<i64> = records.transforms.iter().map(|t| t.id).collect();
        assert_eq!(ids, [7, 8]);
    }

    #[test]
    fn test_script_guid_pattern() {
        let line = format!("  m_Script: {{fileID: 11500000, guid: {GUID}, type: 3}}");
        assert_eq!(script_guid(&line), Some(GUID));

        // Short of the three-field form
        assert_eq!(script_guid("  m_Script: {fileID: 0}"), None);
        assert_eq!(
            script_guid("  m_Script: {fileID: 11500000, guid: abc}"),
            None
        );
        // Extra field
        assert_eq!(
            script_guid(&format!(
                "  m_Script: {{fileID: 1, guid: {GUID}, type: 3, extra: 1}}"
            )),
            None
        );
    }

    #[test]
    fn test_braced_id() {
        assert_eq!(braced_id("100}"), Some(100));
        assert_eq!(braced_id("-42}"), Some(-42));
        assert_eq!(braced_id("0}"), Some(0));
        assert_eq!(braced_id("x}"), None);
    }
}
