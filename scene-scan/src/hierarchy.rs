//! Hierarchy reconstruction: flat transform records into a rooted tree
//!
//! Parent and owner references may point forwards or backwards in the
//! document, so linking is strictly two-pass: every node is inserted into an
//! id-indexed arena first, then parents are resolved. Sibling order is
//! document order, which downstream tooling diffs textually.

use std::collections::HashMap;

use crate::error::SceneError;
use crate::record::SceneRecords;
use crate::{ROOT_ID, ROOT_NAME};

/// One resolved node of a scene tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Document-assigned transform id (0 for the synthetic root)
    pub id: i64,
    /// Resolved display name; empty when the owning object is unnamed or
    /// missing
    pub name: String,
    /// Indices into the tree's arena, in document order
    children: Vec<usize>,
}

/// A fully resolved scene hierarchy.
///
/// Nodes live in an arena; `nodes[0]` is the synthetic root and all links are
/// arena indices rather than pointers.
#[derive(Debug, Clone)]
pub struct SceneTree {
    nodes: Vec<TreeNode>,
}

/// Resolve one scene's flat records into a rooted tree.
///
/// A synthetic root (id 0) is inserted before resolution; top-level
/// transforms attach to it through their own `parent: 0` references. Node
/// names come from the owning object; an owner with no name field (or no
/// owner record at all) resolves to an empty name. A parent id matching no
/// node in the scene is a hard consistency failure.
pub fn build_tree(records: &SceneRecords) -> Result<SceneTree, SceneError> {
    let mut nodes = Vec::with_capacity(records.transforms.len() + 1);
    nodes.push(TreeNode {
        id: ROOT_ID,
        name: ROOT_NAME.to_string(),
        children: Vec::new(),
    });

    // First occurrence wins for duplicated ids, matching a first-match
    // linear scan.
    let mut names: HashMap<i64, Option<&str>> = HashMap::with_capacity(records.objects.len());
    for object in &records.objects {
        names.entry(object.id).or_insert(object.name.as_deref());
    }

    let mut index: HashMap<i64, usize> = HashMap::with_capacity(records.transforms.len() + 1);
    index.insert(ROOT_ID, 0);

    for transform in &records.transforms {
        let name = names
            .get(&transform.owner)
            .copied()
            .flatten()
            .unwrap_or_default();
        nodes.push(TreeNode {
            id: transform.id,
            name: name.to_string(),
            children: Vec::new(),
        });
        index.entry(transform.id).or_insert(nodes.len() - 1);
    }

    for (offset, transform) in records.transforms.iter().enumerate() {
        let parent = *index
            .get(&transform.parent)
            .ok_or(SceneError::UnknownParent {
                id: transform.id,
                parent: transform.parent,
            })?;
        nodes[parent].children.push(offset + 1);
    }

    Ok(SceneTree { nodes })
}

impl SceneTree {
    /// The synthetic root node
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// Node count excluding the synthetic root
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Children of a node, in document order
    pub fn children(&self, node: &TreeNode) -> impl Iterator<Item = &TreeNode> {
        node.children.iter().map(|&idx| &self.nodes[idx])
    }

    /// Pre-order traversal of the forest under the root as `(depth, name)`
    /// pairs. The root itself is excluded; its children are depth 0. A
    /// node's children come before its next sibling.
    pub fn walk(&self) -> Vec<(usize, &str)> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack: Vec<(usize, usize)> = self
            .root()
            .children
            .iter()
            .rev()
            .map(|&idx| (0, idx))
            .collect();

        while let Some((depth, idx)) = stack.pop() {
            let node = &self.nodes[idx];
            out.push((depth, node.name.as_str()));
            for &child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}
