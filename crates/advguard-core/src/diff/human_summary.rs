//! Human-readable summary renderer for snapshot diffs.

use crate::diff::model::SnapshotDiff;

/// Render a human-readable Markdown/text summary of a [`SnapshotDiff`].
///
/// The summary is informational only; policy decisions are made by the
/// engine's checks, not by this renderer.
pub fn render_human_summary(diff: &SnapshotDiff) -> String {
    let mut out = String::new();

    out.push_str("## Advisory Diff\n\n");

    if diff.is_zero() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Documents**: {} added, {} removed, {} modified\n\n",
        diff.added.len(),
        diff.removed.len(),
        diff.modified.len()
    ));

    if !diff.added.is_empty() {
        out.push_str("### Added Documents\n\n");
        for doc in &diff.added {
            out.push_str(&format!(
                "- `{}` ({} advisories)\n",
                doc.name(),
                doc.advisories.len()
            ));
        }
        out.push('\n');
    }

    if !diff.removed.is_empty() {
        out.push_str("### Removed Documents\n\n");
        for doc in &diff.removed {
            out.push_str(&format!("- `{}`\n", doc.name()));
        }
        out.push('\n');
    }

    for doc in &diff.modified {
        out.push_str(&format!("### Modified: `{}`\n\n", doc.name));
        for adv in &doc.added {
            out.push_str(&format!(
                "- **Added** `{}` ({} events)\n",
                adv.id,
                adv.events.len()
            ));
        }
        for adv in &doc.removed {
            out.push_str(&format!("- **Removed** `{}`\n", adv.id));
        }
        for adv in &doc.modified {
            out.push_str(&format!(
                "- **Changed** `{}` (+{} / -{} events)\n",
                adv.id,
                adv.added_events.len(),
                adv.removed_events.len()
            ));
        }
        out.push('\n');
    }

    out
}
