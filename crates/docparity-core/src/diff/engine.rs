//! Tree diff computation engine.
//!
//! The core entry point is [`compute_diff`], which walks a reference and a
//! candidate tree in lockstep and produces a [`TreeDiff`].

use crate::diff::model::{DiffEntry, TreeDiff};
use crate::model::FieldPath;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Compute the structural diff from `reference` to `candidate`.
///
/// - Objects are compared key by key in sorted key order. A key only in the
///   candidate is one insert carrying the whole subtree; a key only in the
///   reference is one delete.
/// - Arrays are compared by position. Same-index elements are diffed
///   recursively; surplus candidate elements are inserts and surplus
///   reference elements are deletes.
/// - Anything else that differs (scalars, or a change of node type) is an
///   update at that path.
///
/// The output is a pure function of the two trees.
pub fn compute_diff(reference: &Value, candidate: &Value) -> TreeDiff {
    let mut entries = Vec::new();
    diff_node(&FieldPath::root(), reference, candidate, &mut entries);
    TreeDiff::new(entries)
}

fn diff_node(path: &FieldPath, reference: &Value, candidate: &Value, out: &mut Vec<DiffEntry>) {
    match (reference, candidate) {
        (Value::Object(ref_map), Value::Object(cand_map)) => {
            diff_objects(path, ref_map, cand_map, out)
        }
        (Value::Array(ref_items), Value::Array(cand_items)) => {
            diff_arrays(path, ref_items, cand_items, out)
        }
        _ if reference == candidate => {}
        _ => out.push(DiffEntry::update(
            path.clone(),
            reference.clone(),
            candidate.clone(),
        )),
    }
}

fn diff_objects(
    path: &FieldPath,
    reference: &Map<String, Value>,
    candidate: &Map<String, Value>,
    out: &mut Vec<DiffEntry>,
) {
    let keys: BTreeSet<&String> = reference.keys().chain(candidate.keys()).collect();

    for key in keys {
        let child = path.child(key.as_str());
        match (reference.get(key), candidate.get(key)) {
            (Some(ref_value), Some(cand_value)) => diff_node(&child, ref_value, cand_value, out),
            (Some(ref_value), None) => out.push(DiffEntry::delete(child, ref_value.clone())),
            (None, Some(cand_value)) => out.push(DiffEntry::insert(child, cand_value.clone())),
            (None, None) => {}
        }
    }
}

fn diff_arrays(path: &FieldPath, reference: &[Value], candidate: &[Value], out: &mut Vec<DiffEntry>) {
    let shared = reference.len().min(candidate.len());

    for (index, (ref_item, cand_item)) in reference.iter().zip(candidate).enumerate() {
        diff_node(&path.child(index), ref_item, cand_item, out);
    }
    for (offset, ref_item) in reference[shared..].iter().enumerate() {
        out.push(DiffEntry::delete(path.child(shared + offset), ref_item.clone()));
    }
    for (offset, cand_item) in candidate[shared..].iter().enumerate() {
        out.push(DiffEntry::insert(path.child(shared + offset), cand_item.clone()));
    }
}
