//! Scene record data structures

/// Object record (`--- !u!1`): a named entity in the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Document-assigned id, unique within a scene
    pub id: i64,
    /// `m_Name` value; absent when the record carries no name field
    pub name: Option<String>,
}

/// Transform record (`--- !u!4`): one node of the spatial hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformRecord {
    /// Document-assigned id, unique within a scene
    pub id: i64,
    /// `m_GameObject` reference: the object this node belongs to
    pub owner: i64,
    /// `m_Father` reference: parent node id, 0 for top-level nodes
    pub parent: i64,
}

/// Behavior record (`--- !u!114`): a script attached to an object.
///
/// Only the script guid survives scanning; it exists to flip the matching
/// inventory entry to used and is discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorRef {
    /// Script asset guid from the `m_Script` reference
    pub guid: String,
}

/// All recognized records of one scene document, in document order.
///
/// Owned by the scene currently being processed; nothing here outlives the
/// scene pass.
#[derive(Debug, Clone, Default)]
pub struct SceneRecords {
    pub objects: Vec<ObjectRecord>,
    pub transforms: Vec<TransformRecord>,
    pub behaviors: Vec<BehaviorRef>,
}

impl SceneRecords {
    /// Look up an object's name by id. First occurrence wins when the
    /// document repeats an id.
    pub fn object_name(&self, id: i64) -> Option<&str> {
        self.objects
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.name.as_deref())
    }
}
