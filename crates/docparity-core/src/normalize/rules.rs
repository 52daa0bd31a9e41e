//! Declarative normalization rules.
//!
//! Each rule addresses one field by dotted path and removes one known,
//! intentional discrepancy between the reference and candidate documents.
//!
//! Every rule is idempotent: applying it to its own output changes nothing.
//! A rule whose field is absent, or has a shape other than the one it
//! expects, leaves both documents untouched.

use crate::model::path::{contains_path, get_path, get_path_mut, remove_path, replace_path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// ILM phase that a candidate-created policy consists of
const ILM_HOT_PHASE: &str = "hot";

/// One normalization step applied to a document pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum NormalizationRule {
    /// Collapse an array down to its first element on both sides
    KeepFirstElement { path: String },

    /// Sort an array of objects by the value of `key` on both sides
    SortArrayBy { path: String, key: String },

    /// Replace a generated identifier with a fixed sentinel on both sides
    ReplaceWithSentinel { path: String, sentinel: String },

    /// Rename the keys of an identifier-keyed map to `<sentinel>_<n>`
    RenameKeysToSentinel { path: String, sentinel: String },

    /// Remove the candidate-only ILM policy a collection agent sets up for itself
    StripCandidateIlmPolicy { ilm_path: String },

    /// Reduce an object to the listed keys on both sides
    ProjectKeys { path: String, keys: Vec<String> },

    /// Treat `null` on one side and absent on the other as equal
    DropNullOrAbsent { path: String },

    /// Accept a candidate array that contains every reference element
    SubsetContainment { path: String },

    /// Empty both arrays when their lengths match
    ClearIfSameLength { path: String },

    /// Remove an optional field from both sides
    RemoveField { path: String },
}

impl NormalizationRule {
    /// Short stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationRule::KeepFirstElement { .. } => "keep_first_element",
            NormalizationRule::SortArrayBy { .. } => "sort_array_by",
            NormalizationRule::ReplaceWithSentinel { .. } => "replace_with_sentinel",
            NormalizationRule::RenameKeysToSentinel { .. } => "rename_keys_to_sentinel",
            NormalizationRule::StripCandidateIlmPolicy { .. } => "strip_candidate_ilm_policy",
            NormalizationRule::ProjectKeys { .. } => "project_keys",
            NormalizationRule::DropNullOrAbsent { .. } => "drop_null_or_absent",
            NormalizationRule::SubsetContainment { .. } => "subset_containment",
            NormalizationRule::ClearIfSameLength { .. } => "clear_if_same_length",
            NormalizationRule::RemoveField { .. } => "remove_field",
        }
    }

    /// Dotted path of the field this rule rewrites
    pub fn path(&self) -> &str {
        match self {
            NormalizationRule::KeepFirstElement { path }
            | NormalizationRule::SortArrayBy { path, .. }
            | NormalizationRule::ReplaceWithSentinel { path, .. }
            | NormalizationRule::RenameKeysToSentinel { path, .. }
            | NormalizationRule::ProjectKeys { path, .. }
            | NormalizationRule::DropNullOrAbsent { path }
            | NormalizationRule::SubsetContainment { path }
            | NormalizationRule::ClearIfSameLength { path }
            | NormalizationRule::RemoveField { path } => path,
            NormalizationRule::StripCandidateIlmPolicy { ilm_path } => ilm_path,
        }
    }

    /// Apply the rule to a document pair in place.
    ///
    /// Returns `true` if either document changed.
    pub fn apply(&self, reference: &mut Value, candidate: &mut Value) -> bool {
        match self {
            NormalizationRule::KeepFirstElement { path } => {
                both(reference, candidate, |doc| keep_first_element(doc, path))
            }
            NormalizationRule::SortArrayBy { path, key } => {
                both(reference, candidate, |doc| sort_array_by(doc, path, key))
            }
            NormalizationRule::ReplaceWithSentinel { path, sentinel } => {
                both(reference, candidate, |doc| {
                    replace_with_sentinel(doc, path, sentinel)
                })
            }
            NormalizationRule::RenameKeysToSentinel { path, sentinel } => {
                let width = sentinel_index_width(reference, candidate, path);
                both(reference, candidate, |doc| {
                    rename_keys_to_sentinel(doc, path, sentinel, width)
                })
            }
            NormalizationRule::StripCandidateIlmPolicy { ilm_path } => {
                strip_candidate_ilm_policy(reference, candidate, ilm_path)
            }
            NormalizationRule::ProjectKeys { path, keys } => {
                both(reference, candidate, |doc| project_keys(doc, path, keys))
            }
            NormalizationRule::DropNullOrAbsent { path } => {
                drop_null_or_absent(reference, candidate, path)
            }
            NormalizationRule::SubsetContainment { path } => {
                subset_containment(reference, candidate, path)
            }
            NormalizationRule::ClearIfSameLength { path } => {
                clear_if_same_length(reference, candidate, path)
            }
            NormalizationRule::RemoveField { path } => {
                both(reference, candidate, |doc| remove_path(doc, path).is_some())
            }
        }
    }
}

/// Run a one-sided rewrite on both documents
fn both<F>(reference: &mut Value, candidate: &mut Value, mut rewrite: F) -> bool
where
    F: FnMut(&mut Value) -> bool,
{
    let changed_reference = rewrite(reference);
    let changed_candidate = rewrite(candidate);
    changed_reference || changed_candidate
}

fn keep_first_element(doc: &mut Value, path: &str) -> bool {
    match get_path_mut(doc, path) {
        Some(Value::Array(items)) if items.len() > 1 => {
            items.truncate(1);
            true
        }
        _ => false,
    }
}

/// Ordering key for `SortArrayBy`: numbers compare numerically
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl SortKey {
    fn of(item: &Value, key: &str) -> Self {
        match item.get(key) {
            None => SortKey::Missing,
            Some(Value::Number(n)) => n.as_f64().map_or(SortKey::Missing, SortKey::Number),
            Some(Value::String(s)) => SortKey::Text(s.clone()),
            Some(other) => SortKey::Text(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

fn sort_array_by(doc: &mut Value, path: &str, key: &str) -> bool {
    let Some(Value::Array(items)) = get_path_mut(doc, path) else {
        return false;
    };
    let before: Vec<SortKey> = items.iter().map(|item| SortKey::of(item, key)).collect();
    items.sort_by_cached_key(|item| SortKey::of(item, key));
    items
        .iter()
        .map(|item| SortKey::of(item, key))
        .ne(before.into_iter())
}

fn replace_with_sentinel(doc: &mut Value, path: &str, sentinel: &str) -> bool {
    let sentinel = Value::String(sentinel.to_string());
    if get_path(doc, path) == Some(&sentinel) {
        return false;
    }
    replace_path(doc, path, sentinel).is_some()
}

/// Digits needed for the largest index on either side
///
/// Both sides share one width so that the same position gets the same key.
fn sentinel_index_width(reference: &Value, candidate: &Value, path: &str) -> usize {
    let len = |doc: &Value| get_path(doc, path).and_then(Value::as_object).map_or(0, Map::len);
    len(reference)
        .max(len(candidate))
        .saturating_sub(1)
        .to_string()
        .len()
}

fn rename_keys_to_sentinel(doc: &mut Value, path: &str, sentinel: &str, width: usize) -> bool {
    let Some(Value::Object(map)) = get_path_mut(doc, path) else {
        return false;
    };

    // Zero-padded indices keep lexical key order equal to numeric order.
    let original_keys: Vec<String> = map.keys().cloned().collect();
    let renamed: Map<String, Value> = std::mem::take(map)
        .into_iter()
        .enumerate()
        .map(|(index, (_, value))| (format!("{}_{:0width$}", sentinel, index), value))
        .collect();

    let changed = renamed.keys().ne(original_keys.iter());
    *map = renamed;
    changed
}

fn is_hot_only_single_index_policy(policy: &Value) -> bool {
    let hot_only = policy
        .get("phases")
        .and_then(Value::as_object)
        .map(|phases| phases.len() == 1 && phases.contains_key(ILM_HOT_PHASE))
        .unwrap_or(false);
    let single_index = policy.get("indices_managed").and_then(Value::as_u64) == Some(1);
    hot_only && single_index
}

fn policy_stats_len(ilm: Option<&Value>) -> Option<usize> {
    ilm?.get("policy_stats")?.as_array().map(Vec::len)
}

fn strip_candidate_ilm_policy(reference: &Value, candidate: &mut Value, ilm_path: &str) -> bool {
    let reference_len = policy_stats_len(get_path(reference, ilm_path)).unwrap_or(0);
    let Some(ilm) = get_path_mut(candidate, ilm_path) else {
        return false;
    };
    // Only the one policy the agent creates for itself is stripped.
    if policy_stats_len(Some(&*ilm)).unwrap_or(0) != reference_len + 1 {
        return false;
    }

    let Some(Value::Array(policies)) = ilm.get_mut("policy_stats") else {
        return false;
    };
    let Some(index) = policies.iter().rposition(is_hot_only_single_index_policy) else {
        return false;
    };
    policies.remove(index);

    if let Some(count) = ilm.get_mut("policy_count") {
        if let Some(n) = count.as_u64() {
            *count = Value::from(n.saturating_sub(1));
        }
    }
    true
}

fn project_keys(doc: &mut Value, path: &str, keys: &[String]) -> bool {
    let Some(Value::Object(map)) = get_path_mut(doc, path) else {
        return false;
    };
    let before = map.len();
    map.retain(|key, _| keys.iter().any(|keep| keep == key));
    map.len() != before
}

fn drop_null_or_absent(reference: &mut Value, candidate: &mut Value, path: &str) -> bool {
    let null_vs_absent = |a: &Value, b: &Value| {
        matches!(get_path(a, path), Some(Value::Null)) && !contains_path(b, path)
    };
    if null_vs_absent(&*reference, &*candidate) || null_vs_absent(&*candidate, &*reference) {
        both(reference, candidate, |doc| remove_path(doc, path).is_some())
    } else {
        false
    }
}

fn subset_containment(reference: &mut Value, candidate: &mut Value, path: &str) -> bool {
    let Some(Value::Array(candidate_items)) = get_path(candidate, path) else {
        return false;
    };
    let Some(Value::Array(reference_items)) = get_path(reference, path) else {
        return false;
    };
    if reference_items == candidate_items {
        return false;
    }
    if !reference_items
        .iter()
        .all(|item| candidate_items.contains(item))
    {
        return false;
    }

    let replacement = Value::Array(candidate_items.clone());
    replace_path(reference, path, replacement).is_some()
}

fn clear_if_same_length(reference: &mut Value, candidate: &mut Value, path: &str) -> bool {
    let lengths = (
        get_path(reference, path).and_then(Value::as_array).map(Vec::len),
        get_path(candidate, path).and_then(Value::as_array).map(Vec::len),
    );
    match lengths {
        (Some(0), Some(0)) => false,
        (Some(a), Some(b)) if a == b => both(reference, candidate, |doc| {
            replace_path(doc, path, Value::Array(Vec::new())).is_some()
        }),
        _ => false,
    }
}
