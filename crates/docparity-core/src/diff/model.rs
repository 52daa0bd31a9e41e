//! Tree diff output types.
//!
//! A [`TreeDiff`] is a flat, ordered list of [`DiffEntry`] values. Every entry
//! carries the full [`FieldPath`] of the node it describes, so consumers never
//! need to walk a nested diff structure.

use crate::model::{FieldPath, PathSegment};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of structural change at one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOp {
    /// Node present in the candidate only
    Insert,
    /// Node present in the reference only
    Delete,
    /// Node present on both sides with a different scalar value or type
    Update,
}

impl fmt::Display for DiffOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffOp::Insert => "insert",
            DiffOp::Delete => "delete",
            DiffOp::Update => "update",
        };
        f.write_str(name)
    }
}

/// One change between the reference and candidate trees.
///
/// `old` is the reference value (absent for inserts), `new` the candidate
/// value (absent for deletes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub op: DiffOp,
    pub path: FieldPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

impl DiffEntry {
    pub fn insert(path: FieldPath, value: Value) -> Self {
        Self {
            op: DiffOp::Insert,
            path,
            old: None,
            new: Some(value),
        }
    }

    pub fn delete(path: FieldPath, value: Value) -> Self {
        Self {
            op: DiffOp::Delete,
            path,
            old: Some(value),
            new: None,
        }
    }

    pub fn update(path: FieldPath, old: Value, new: Value) -> Self {
        Self {
            op: DiffOp::Update,
            path,
            old: Some(old),
            new: Some(new),
        }
    }

    /// The inserted, deleted, or updated-to value
    pub fn payload(&self) -> &Value {
        static NULL: Value = Value::Null;
        match self.op {
            DiffOp::Delete => self.old.as_ref().unwrap_or(&NULL),
            DiffOp::Insert | DiffOp::Update => self.new.as_ref().unwrap_or(&NULL),
        }
    }

    /// Dotted path of the containing node (`""` for top-level fields)
    pub fn parent_dotted(&self) -> String {
        self.path
            .parent()
            .map(|parent| parent.to_dotted())
            .unwrap_or_default()
    }

    /// Key or index of the changed node within its parent
    pub fn child_key(&self) -> String {
        self.path
            .last()
            .map(PathSegment::to_string)
            .unwrap_or_default()
    }

    /// Whether the change sits directly under the document root
    pub fn is_top_level(&self) -> bool {
        self.path.depth() == 1
    }
}

/// Ordered structural diff of one document pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeDiff {
    entries: Vec<DiffEntry>,
}

impl TreeDiff {
    pub fn new(entries: Vec<DiffEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one operation kind, in diff order
    pub fn by_op(&self, op: DiffOp) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(move |entry| entry.op == op)
    }

    pub fn insertions(&self) -> impl Iterator<Item = &DiffEntry> {
        self.by_op(DiffOp::Insert)
    }

    pub fn deletions(&self) -> impl Iterator<Item = &DiffEntry> {
        self.by_op(DiffOp::Delete)
    }

    pub fn updates(&self) -> impl Iterator<Item = &DiffEntry> {
        self.by_op(DiffOp::Update)
    }

    /// True when the diff holds no inserts or deletes (updates only, or nothing)
    pub fn is_shape_preserving(&self) -> bool {
        self.entries.iter().all(|entry| entry.op == DiffOp::Update)
    }
}

impl IntoIterator for TreeDiff {
    type Item = DiffEntry;
    type IntoIter = std::vec::IntoIter<DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
