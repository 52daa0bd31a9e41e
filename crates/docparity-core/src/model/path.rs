//! Field paths into JSON document trees.
//!
//! Two addressing forms are used:
//!
//! - [`FieldPath`]: the exact, typed location produced by the tree differ
//!   (object keys and array indices kept distinct).
//! - Dotted strings such as `stack_stats.xpack.ilm`: the form used by
//!   allow-lists and normalization rules. A dotted segment addresses an
//!   object key, or an array index when the container is an array and the
//!   segment parses as an integer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Separator between segments of a dotted path
pub const PATH_SEPARATOR: char = '.';

/// One step from a node to its child
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member
    Key(String),
    /// Array element
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Ordered sequence of segments locating a node from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from its segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Path to a child of this node
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Path of the containing node, `None` at the root
    pub fn parent(&self) -> Option<FieldPath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Final segment, `None` at the root
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of segments; top-level fields have depth 1
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Dotted rendering, e.g. `index_recovery.shards.0.id`
    pub fn to_dotted(&self) -> String {
        self.0
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

/// Concatenate a parent's dotted path with a child key, trimming stray separators
///
/// `join_dotted("", "service")` is `"service"`;
/// `join_dotted("source_node", "uuid")` is `"source_node.uuid"`.
pub fn join_dotted(parent: &str, child: &str) -> String {
    let parent = parent.trim_matches(PATH_SEPARATOR);
    let child = child.trim_matches(PATH_SEPARATOR);
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}{}{}", parent, PATH_SEPARATOR, child),
    }
}

fn split_dotted(dotted: &str) -> impl Iterator<Item = &str> {
    dotted
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn step_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Look up the node at a dotted path
pub fn get_path<'a>(root: &'a Value, dotted: &str) -> Option<&'a Value> {
    split_dotted(dotted).try_fold(root, step)
}

/// Mutable lookup of the node at a dotted path
pub fn get_path_mut<'a>(root: &'a mut Value, dotted: &str) -> Option<&'a mut Value> {
    split_dotted(dotted).try_fold(root, step_mut)
}

/// Split a dotted path into its parent path and final key
fn split_last(dotted: &str) -> Option<(String, &str)> {
    let segments: Vec<&str> = split_dotted(dotted).collect();
    let (last, parents) = segments.split_last()?;
    Some((parents.join("."), last))
}

/// Whether the node at `dotted` exists (a `null` value exists)
pub fn contains_path(root: &Value, dotted: &str) -> bool {
    get_path(root, dotted).is_some()
}

/// Remove the object member at a dotted path, returning its value
///
/// Only object members are removed; a path ending in an array index is
/// left alone so that sibling indices never shift.
pub fn remove_path(root: &mut Value, dotted: &str) -> Option<Value> {
    let (parent, last) = split_last(dotted)?;
    match get_path_mut(root, &parent)? {
        Value::Object(map) => map.remove(last),
        _ => None,
    }
}

/// Replace the node at a dotted path, returning the previous value
///
/// The node must already exist; nothing is created.
pub fn replace_path(root: &mut Value, dotted: &str, value: Value) -> Option<Value> {
    let slot = get_path_mut(root, dotted)?;
    Some(std::mem::replace(slot, value))
}
