//! Snapshot diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares two snapshots
//! and produces a [`SnapshotDiff`]. The computation is pure and total: a
//! missing document or advisory is a diff outcome, never an error.

use std::collections::{BTreeMap, HashSet};

use crate::diff::model::{AdvisoryDiff, DocumentDiff, SnapshotDiff};
use crate::model::{Advisory, Document, Event, Snapshot};

/// Three-way partition of two keyed collections.
///
/// Returns `(only_in_b, only_in_a, in_both)`, with `only_in_b` and `in_both`
/// following b's order and `only_in_a` following a's order.
fn partition<'a, T, K, F>(
    a: &[&'a T],
    b: &[&'a T],
    key: F,
) -> (Vec<&'a T>, Vec<&'a T>, Vec<(&'a T, &'a T)>)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    // Reversed so the first occurrence of a key wins.
    let a_by_key: BTreeMap<K, &'a T> = a.iter().rev().map(|x| (key(x), *x)).collect();
    let b_by_key: BTreeMap<K, &'a T> = b.iter().rev().map(|x| (key(x), *x)).collect();

    let mut added = Vec::new();
    let mut both = Vec::new();
    for item in b {
        match a_by_key.get(&key(item)) {
            Some(before) => both.push((*before, *item)),
            None => added.push(*item),
        }
    }
    let removed = a
        .iter()
        .filter(|item| !b_by_key.contains_key(&key(item)))
        .copied()
        .collect();

    (added, removed, both)
}

/// Events of `from` that have no equal event in `against`.
fn event_difference(from: &[Event], against: &[Event]) -> Vec<Event> {
    let against: HashSet<&Event> = against.iter().collect();
    from.iter()
        .filter(|e| !against.contains(e))
        .cloned()
        .collect()
}

fn diff_advisory(before: &Advisory, after: &Advisory) -> AdvisoryDiff {
    AdvisoryDiff {
        id: after.id.clone(),
        added_events: event_difference(&after.events, &before.events),
        removed_events: event_difference(&before.events, &after.events),
    }
}

fn diff_document(before: &Document, after: &Document) -> DocumentDiff {
    let a: Vec<&Advisory> = before.advisories.iter().collect();
    let b: Vec<&Advisory> = after.advisories.iter().collect();
    let (added, removed, both) = partition(&a, &b, |adv: &Advisory| adv.id.clone());

    DocumentDiff {
        name: after.name().to_string(),
        added: added.into_iter().cloned().collect(),
        removed: removed.into_iter().cloned().collect(),
        modified: both
            .into_iter()
            .filter(|(before, after)| before != after)
            .map(|(before, after)| diff_advisory(before, after))
            .collect(),
    }
}

/// Compute the structural delta from `baseline` to `current`.
///
/// Documents are matched by package name. A document that is deep-equal on
/// both sides contributes nothing.
pub fn compute_diff(baseline: &Snapshot, current: &Snapshot) -> SnapshotDiff {
    let a: Vec<&Document> = baseline.by_package().into_values().collect();
    let b: Vec<&Document> = current.by_package().into_values().collect();
    let (added, removed, both) = partition(&a, &b, |doc: &Document| doc.name().to_string());

    SnapshotDiff {
        added: added.into_iter().cloned().collect(),
        removed: removed.into_iter().cloned().collect(),
        modified: both
            .into_iter()
            .filter(|(before, after)| before != after)
            .map(|(before, after)| diff_document(before, after))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(day: u32, version: &str) -> Event {
        Event::fixed(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(), version)
    }

    #[test]
    fn test_event_difference_is_value_based() {
        let before = vec![event(1, "1.0-r0")];
        let after = vec![event(1, "1.0-r1")];
        assert_eq!(event_difference(&after, &before), vec![event(1, "1.0-r1")]);
        assert_eq!(event_difference(&before, &after), vec![event(1, "1.0-r0")]);
    }

    #[test]
    fn test_reordered_events_are_not_a_change_at_event_level() {
        let before = Advisory::new("CVE-2024-0001")
            .with_event(event(1, "1.0-r0"))
            .with_event(event(2, "1.1-r0"));
        let after = Advisory::new("CVE-2024-0001")
            .with_event(event(2, "1.1-r0"))
            .with_event(event(1, "1.0-r0"));

        let diff = diff_advisory(&before, &after);
        assert!(diff.added_events.is_empty());
        assert!(diff.removed_events.is_empty());
    }

    #[test]
    fn test_alias_only_change_is_modified_without_events() {
        let before = Document::new("curl")
            .with_advisory(Advisory::new("CVE-2024-0001").with_event(event(1, "1.0-r0")));
        let after = Document::new("curl").with_advisory(
            Advisory::new("CVE-2024-0001")
                .with_aliases(["GHSA-2cfg-hjmp-qrvw"])
                .with_event(event(1, "1.0-r0")),
        );

        let diff = diff_document(&before, &after);
        assert_eq!(diff.modified.len(), 1);
        assert!(diff.modified[0].added_events.is_empty());
        assert!(!diff.modified[0].is_ambiguous());
    }
}
