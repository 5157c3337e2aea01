//! Policy over the change from the baseline snapshot
//!
//! Documents and advisories may not disappear, existing events may not be
//! edited or dropped, and anything newly added must carry a fresh timestamp.

use advguard_core::diff::{AdvisoryDiff, DocumentDiff};
use advguard_core::{compute_diff, Advisory, Document, ErrorTree, Event, ValidationError};

use crate::checks::added_event_label;
use crate::options::ValidateOptions;

pub fn check_diff_policy(opts: &ValidateOptions) -> Vec<ErrorTree> {
    let Some(baseline) = opts.baseline.as_ref() else {
        return Vec::new();
    };
    let diff = compute_diff(baseline, &opts.current);
    let in_scope = |name: &str| opts.scope.contains(name);

    let removed = diff
        .removed
        .iter()
        .filter(|doc| in_scope(doc.name()))
        .map(|doc| ErrorTree::leaf(doc.name(), ValidationError::DocumentRemoved));

    let modified = diff
        .modified
        .iter()
        .filter(|doc| in_scope(&doc.name))
        .map(|doc| modified_document(opts, doc));

    let added = diff
        .added
        .iter()
        .filter(|doc| in_scope(doc.name()))
        .map(|doc| added_document(opts, doc));

    removed.chain(modified).chain(added).collect()
}

fn recency(opts: &ValidateOptions, index: usize, event: &Event) -> ErrorTree {
    if opts.is_recent(event.timestamp) {
        return ErrorTree::empty();
    }
    ErrorTree::leaf(
        added_event_label(index),
        ValidationError::StaleNewEvent {
            timestamp: event.timestamp,
            max_age_days: opts.recency_window.num_days(),
        },
    )
}

/// Every event of a wholly new advisory is new
fn added_advisory(opts: &ValidateOptions, adv: &Advisory) -> ErrorTree {
    ErrorTree::node(
        &adv.id,
        adv.events
            .iter()
            .enumerate()
            .map(|(i, e)| recency(opts, i, e))
            .collect(),
    )
}

fn modified_advisory(opts: &ValidateOptions, adv: &AdvisoryDiff) -> ErrorTree {
    let mut children = Vec::new();
    if adv.is_ambiguous() {
        // An edited event shows up as one removal plus one addition.
        children.push(ErrorTree::bare(ValidationError::AmbiguousEventChange));
    } else if !adv.removed_events.is_empty() {
        children.push(ErrorTree::bare(ValidationError::EventsRemoved));
    }
    children.extend(
        adv.added_events
            .iter()
            .enumerate()
            .map(|(i, e)| recency(opts, i, e)),
    );
    ErrorTree::node(&adv.id, children)
}

/// A modified document must still be backed by a build definition or a
/// published package. Both datasets are needed to tell; with either one
/// missing the rule is not applied, so a package whose build definition was
/// retired but which is still published stays editable.
fn linkage(opts: &ValidateOptions, package: &str) -> ErrorTree {
    let (Some(build_configs), Some(index)) =
        (opts.build_configs.as_ref(), opts.package_index.as_ref())
    else {
        return ErrorTree::empty();
    };
    if build_configs.contains(package) || index.contains_package(package) {
        return ErrorTree::empty();
    }
    ErrorTree::bare(ValidationError::MissingBuildOrIndexLinkage)
}

fn modified_document(opts: &ValidateOptions, doc: &DocumentDiff) -> ErrorTree {
    let mut children = vec![linkage(opts, &doc.name)];
    children.extend(
        doc.removed
            .iter()
            .map(|adv| ErrorTree::leaf(&adv.id, ValidationError::AdvisoryRemoved)),
    );
    children.extend(doc.modified.iter().map(|adv| modified_advisory(opts, adv)));
    children.extend(doc.added.iter().map(|adv| added_advisory(opts, adv)));
    ErrorTree::node(&doc.name, children)
}

/// A new document needs an active build definition; a published package alone
/// is not enough.
fn added_document(opts: &ValidateOptions, doc: &Document) -> ErrorTree {
    let mut children = Vec::new();
    if let Some(build_configs) = opts.build_configs.as_ref() {
        if !build_configs.contains(doc.name()) {
            children.push(ErrorTree::bare(ValidationError::MissingBuildConfiguration));
        }
    }
    children.extend(doc.advisories.iter().map(|adv| added_advisory(opts, adv)));
    ErrorTree::node(doc.name(), children)
}
