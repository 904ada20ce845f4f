//! The reconciler: structural set difference between two record collections.
//!
//! Given an expected collection (usually the API view) and an actual one
//! (usually the UI view), [`diff`] projects both onto a caller-chosen
//! comparison schema and computes a multiset full outer join on structural
//! equality. Records equal on all retained fields cancel pairwise; whatever
//! remains unmatched is reported on its own side.
//!
//! A non-empty [`Reconciliation`] is a normal result value, not an error;
//! the caller decides whether differences fail a scenario.

use std::collections::HashMap;
use std::fmt;

use crate::field::{Field, FieldSet};
use crate::record::DeviceRecord;

/// Outcome of a [`diff`] call.
///
/// Invariant: a record appears in at most one of the two sequences, and a
/// record structurally equal (under the comparison schema) on both sides
/// appears in neither. Output order is stable: `only_in_left` follows left
/// input order, `only_in_right` follows right input order, so tests can
/// assert exact sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Records present only in the left (expected) collection.
    pub only_in_left: Vec<DeviceRecord>,
    /// Records present only in the right (actual) collection.
    pub only_in_right: Vec<DeviceRecord>,
}

impl Reconciliation {
    /// True when both sides matched completely.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.only_in_left.is_empty() && self.only_in_right.is_empty()
    }

    /// Total number of unmatched records across both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.only_in_left.len() + self.only_in_right.len()
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "collections match");
        }
        writeln!(f, "{} unmatched record(s)", self.len())?;
        for record in &self.only_in_left {
            writeln!(f, "  left only:  {record:?}")?;
        }
        for record in &self.only_in_right {
            writeln!(f, "  right only: {record:?}")?;
        }
        Ok(())
    }
}

/// A record's value for one field, borrowed for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FieldValue<'a> {
    Text(Option<&'a str>),
    Flag(Option<bool>),
}

/// Projects a record onto the retained field set, in declaration order.
fn project<'a>(record: &'a DeviceRecord, ignored: &FieldSet) -> Vec<FieldValue<'a>> {
    Field::ALL
        .into_iter()
        .filter(|field| !ignored.contains(*field))
        .map(|field| match field {
            Field::Id => FieldValue::Text(record.id.as_deref()),
            Field::SystemName => FieldValue::Text(record.system_name.as_deref()),
            Field::DeviceType => FieldValue::Text(record.device_type.as_deref()),
            Field::HddCapacity => FieldValue::Text(record.hdd_capacity.as_deref()),
            Field::Edit => FieldValue::Flag(record.edit),
            Field::Remove => FieldValue::Flag(record.remove),
            Field::Displayed => FieldValue::Flag(record.displayed),
        })
        .collect()
}

/// Multiset occurrence counts of projected records.
fn counts<'a>(
    records: &'a [DeviceRecord],
    ignored: &FieldSet,
) -> HashMap<Vec<FieldValue<'a>>, usize> {
    let mut map: HashMap<Vec<FieldValue<'a>>, usize> = HashMap::with_capacity(records.len());
    for record in records {
        *map.entry(project(record, ignored)).or_default() += 1;
    }
    map
}

/// One side of the outer join: records of `side` with no remaining match in
/// `other`, in input order.
fn unmatched<'a>(
    side: &'a [DeviceRecord],
    mut other: HashMap<Vec<FieldValue<'a>>, usize>,
    ignored: &FieldSet,
) -> Vec<DeviceRecord> {
    side.iter()
        .filter(|record| match other.get_mut(&project(record, ignored)) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

/// Computes the symmetric set difference of two record collections under a
/// comparison schema.
///
/// Both collections are projected onto `all fields − ignored` and compared
/// by structural equality: two records are the same iff every retained field
/// matches exactly, `None`s included. Duplicates match pairwise (multiset
/// semantics), mirroring an outer join with an indicator column.
///
/// Pure and deterministic: no I/O, and output order follows stable input
/// order.
///
/// # Example
///
/// ```
/// use devlens_core::{diff, DeviceRecord, FieldSet};
///
/// let a = vec![DeviceRecord { system_name: Some("X".into()), ..DeviceRecord::default() }];
/// let result = diff(&a, &a, &FieldSet::empty());
/// assert!(result.is_empty());
/// ```
#[must_use]
pub fn diff(
    left: &[DeviceRecord],
    right: &[DeviceRecord],
    ignored: &FieldSet,
) -> Reconciliation {
    Reconciliation {
        only_in_left: unmatched(left, counts(right, ignored), ignored),
        only_in_right: unmatched(right, counts(left, ignored), ignored),
    }
}
