//! Duplicate detection over parsed documents.
//!
//! Only top-level sequence fields are scanned. Each field is checked in a
//! single pass with a hash map from entry key to the index where it was
//! first seen, so the violation always names the later occurrence.
//!
//! Two rules apply:
//! - the special field (default `layoutAssignments`) holds mappings keyed by
//!   `layout` plus an optional `recordType`;
//! - every other sequence field compares whole entries by canonical form.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use serde::Serialize;

use crate::document::{Document, Scalar};

/// Default name of the field checked with the layout/recordType rule.
pub const DEFAULT_SPECIAL_FIELD: &str = "layoutAssignments";

/// Record type assumed when an assignment has none.
///
/// Entries carrying this record type never collide with each other.
pub const NO_RECORD_TYPE: &str = "noRecordType";

/// One duplicate-entry finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Top-level field holding the duplicate.
    pub field: String,
    /// Index of the duplicate (later) occurrence.
    pub index: usize,
    /// Index of the earlier occurrence it repeats.
    pub first_index: usize,
    /// Human-readable description.
    pub description: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.description)
    }
}

/// Identity of a special-field entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AssignmentKey {
    Layout { layout: String, record_type: String },
    Raw(String),
}

/// Duplicate detector.
///
/// Stateless apart from its configuration; `detect` has no side effects
/// and may be shared across tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detector {
    special_field: String,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIAL_FIELD)
    }
}

impl Detector {
    /// Creates a detector applying the layout rule to `special_field`.
    #[must_use]
    pub fn new(special_field: impl Into<String>) -> Self {
        Self {
            special_field: special_field.into(),
        }
    }

    /// Name of the field checked with the layout/recordType rule.
    #[must_use]
    pub fn special_field(&self) -> &str {
        &self.special_field
    }

    /// Returns every duplicate found in the top-level sequence fields of
    /// `doc`, in field order and then entry order.
    ///
    /// Documents whose root is not a mapping have no fields and yield
    /// nothing.
    #[must_use]
    pub fn detect(&self, doc: &Document) -> Vec<Violation> {
        let Some(fields) = doc.as_mapping() else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for (field, value) in fields {
            let Document::Sequence(entries) = value else {
                continue;
            };
            let name = field.to_string();
            if field.as_str() == Some(self.special_field.as_str()) {
                detect_assignments(&name, entries, &mut violations);
            } else {
                detect_repeats(&name, entries, &mut violations);
            }
        }
        violations
    }
}

/// Generic rule: an entry repeats if its canonical form was seen earlier.
fn detect_repeats(field: &str, entries: &[Document], violations: &mut Vec<Violation>) {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        match seen.entry(entry.canonical()) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(slot) => {
                violations.push(repeat_violation(field, idx, *slot.get(), slot.key()));
            }
        }
    }
}

fn repeat_violation(field: &str, index: usize, first_index: usize, canonical: &str) -> Violation {
    Violation {
        field: field.to_string(),
        index,
        first_index,
        description: format!(
            "Duplicate entry at index {index} (first seen at index {first_index}): {canonical}"
        ),
    }
}

/// Special-field rule: entries collide on equal `layout` and `recordType`.
///
/// Entries that are not mappings or have no `layout` fall back to
/// canonical comparison among themselves.
fn detect_assignments(field: &str, entries: &[Document], violations: &mut Vec<Violation>) {
    let mut seen: HashMap<AssignmentKey, usize> = HashMap::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        let Some(key) = assignment_key(entry) else {
            continue;
        };
        match seen.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(slot) => {
                let first_index = *slot.get();
                let violation = match slot.key() {
                    AssignmentKey::Raw(canonical) => {
                        repeat_violation(field, idx, first_index, canonical)
                    }
                    AssignmentKey::Layout { .. } => {
                        let layout = entry
                            .get("layout")
                            .map_or_else(String::new, Document::display_text);
                        let record_type = entry
                            .get("recordType")
                            .map_or_else(String::new, Document::display_text);
                        Violation {
                            field: field.to_string(),
                            index: idx,
                            first_index,
                            description: format!(
                                "Duplicate layout assignment at index {idx} (first seen at index {first_index}): \
                                 layout '{layout}' with recordType '{record_type}'"
                            ),
                        }
                    }
                };
                violations.push(violation);
            }
        }
    }
}

/// Computes the collision key of a special-field entry.
///
/// Returns `None` for entries that can never collide: those without an
/// explicit record type.
fn assignment_key(entry: &Document) -> Option<AssignmentKey> {
    let Some(layout) = entry.get("layout") else {
        return Some(AssignmentKey::Raw(entry.canonical()));
    };

    match entry.get("recordType") {
        None | Some(Document::Scalar(Scalar::Null)) => None,
        Some(Document::Scalar(Scalar::String(rt))) if rt == NO_RECORD_TYPE => None,
        Some(record_type) => Some(AssignmentKey::Layout {
            layout: layout.canonical(),
            record_type: record_type.canonical(),
        }),
    }
}
