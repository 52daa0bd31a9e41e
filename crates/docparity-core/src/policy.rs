//! Parity policy engine
//!
//! Classifies the inserts and deletes of a [`TreeDiff`] against allow-lists
//! of dotted field paths. Anything not covered is a [`Violation`]. Updates
//! are always permitted: the two collection paths may disagree on values as
//! long as the document shape matches.
//!
//! Matching is exact. An entry is allowed when the dotted path built from its
//! parent path and its own key is a member of the allow-list, so `service`
//! covers an inserted top-level `service` subtree but `node_stats` does not
//! cover an insert at `node_stats.jvm.gc`.

use crate::diff::{DiffEntry, DiffOp, TreeDiff};
use crate::model::path::join_dotted;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Immutable set of dotted field paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(BTreeSet<String>);

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new list holding this list's entries plus `extras`
    ///
    /// # Example
    /// ```
    /// use docparity_core::policy::AllowList;
    ///
    /// let base = AllowList::from_iter(["service", "agent"]);
    /// let run = base.extended(["custom_extra"]);
    /// assert!(run.contains("custom_extra"));
    /// assert!(!base.contains("custom_extra"));
    /// ```
    pub fn extended<I, S>(&self, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries = self.0.clone();
        entries.extend(extras.into_iter().map(Into::into));
        Self(entries)
    }

    pub fn contains(&self, dotted: &str) -> bool {
        self.0.contains(dotted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Effective policy for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Fields the candidate may add
    pub allowed_insertions: AllowList,
    /// Fields the candidate may drop
    pub allowed_deletions: AllowList,
    /// Fields the candidate must drop; implicitly allowed deletions
    pub required_deletions: AllowList,
    /// Types whose documents keep every field on both sides
    pub deletion_exempt_doc_types: BTreeSet<String>,
}

impl PolicyConfig {
    /// Whether the deletion rules are suspended for `doc_type`
    pub fn is_deletion_exempt(&self, doc_type: &str) -> bool {
        self.deletion_exempt_doc_types.contains(doc_type)
    }

    fn deletion_allowed(&self, dotted: &str) -> bool {
        self.allowed_deletions.contains(dotted) || self.required_deletions.contains(dotted)
    }
}

/// Why a document pair failed parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    UnexpectedInsertion,
    UnexpectedDeletion,
    MissingRequiredDeletion,
    MissingDocumentType,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::UnexpectedInsertion => "unexpected insertion",
            ViolationKind::UnexpectedDeletion => "unexpected deletion",
            ViolationKind::MissingRequiredDeletion => "missing required deletion",
            ViolationKind::MissingDocumentType => "missing document type",
        };
        f.write_str(name)
    }
}

/// One parity failure
///
/// `path` is the dotted field path; it is empty for `MissingDocumentType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub doc_type: String,
    pub kind: ViolationKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Violation {
    fn from_entry(doc_type: &str, kind: ViolationKind, dotted: String, entry: &DiffEntry) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            kind,
            path: dotted,
            value: Some(entry.payload().clone()),
        }
    }

    pub fn missing_required_deletion(doc_type: &str, path: &str) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            kind: ViolationKind::MissingRequiredDeletion,
            path: path.to_string(),
            value: None,
        }
    }

    pub fn missing_document_type(doc_type: &str) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            kind: ViolationKind::MissingDocumentType,
            path: String::new(),
            value: None,
        }
    }
}

/// Evaluate one document type's diff against the policy
///
/// Violations come out in diff order, followed by missing required
/// deletions in allow-list order. Evaluation never stops early.
pub fn evaluate(doc_type: &str, diff: &TreeDiff, config: &PolicyConfig) -> Vec<Violation> {
    let exempt = config.is_deletion_exempt(doc_type);
    let mut violations = Vec::new();
    let mut deleted = BTreeSet::new();

    for entry in diff.entries() {
        let dotted = join_dotted(&entry.parent_dotted(), &entry.child_key());
        match entry.op {
            DiffOp::Update => {}
            DiffOp::Insert => {
                if !config.allowed_insertions.contains(&dotted) {
                    violations.push(Violation::from_entry(
                        doc_type,
                        ViolationKind::UnexpectedInsertion,
                        dotted,
                        entry,
                    ));
                }
            }
            DiffOp::Delete => {
                if exempt || !config.deletion_allowed(&dotted) {
                    violations.push(Violation::from_entry(
                        doc_type,
                        ViolationKind::UnexpectedDeletion,
                        dotted,
                        entry,
                    ));
                } else {
                    deleted.insert(dotted);
                }
            }
        }
    }

    if !exempt {
        violations.extend(
            config
                .required_deletions
                .iter()
                .filter(|required| !deleted.contains(*required))
                .map(|required| Violation::missing_required_deletion(doc_type, required)),
        );
    }

    violations
}
