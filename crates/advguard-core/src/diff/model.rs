//! Snapshot diff output types.
//!
//! All types implement `Debug, Clone, Serialize, PartialEq`.
//! Document-level collections are ordered by package name, advisory-level
//! collections follow the document's authoring order.

use serde::Serialize;

use crate::model::{Advisory, Document, Event};

/// The structural delta between a baseline and a current snapshot.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SnapshotDiff {
    /// Documents present only in the current snapshot
    pub added: Vec<Document>,
    /// Documents present only in the baseline snapshot
    pub removed: Vec<Document>,
    /// Documents present in both snapshots that are not deep-equal
    pub modified: Vec<DocumentDiff>,
}

impl SnapshotDiff {
    /// True when the two snapshots are equal at every level
    pub fn is_zero(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Advisory-level delta for one document present on both sides.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentDiff {
    /// Package name of the document
    pub name: String,
    /// Advisories present only in the current document
    pub added: Vec<Advisory>,
    /// Advisories present only in the baseline document
    pub removed: Vec<Advisory>,
    /// Advisories present on both sides that are not deep-equal
    pub modified: Vec<AdvisoryDiff>,
}

/// Coarse event-level delta for one advisory present on both sides.
///
/// `added_events` and `removed_events` are value-equality set differences,
/// not a positional diff: an event whose timestamp or payload changed shows
/// up once in each list. Both lists may be empty when only the aliases changed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvisoryDiff {
    /// Advisory ID
    pub id: String,
    /// Events in the current advisory with no equal event in the baseline
    pub added_events: Vec<Event>,
    /// Events in the baseline advisory with no equal event in the current one
    pub removed_events: Vec<Event>,
}

impl AdvisoryDiff {
    /// Removed and added events coexist, so a modification cannot be told apart
    /// from a removal followed by an addition.
    pub fn is_ambiguous(&self) -> bool {
        !self.added_events.is_empty() && !self.removed_events.is_empty()
    }
}
