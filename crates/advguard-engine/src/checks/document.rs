//! Checks over the current snapshot alone

use std::collections::HashMap;

use advguard_core::{ErrorTree, ValidationError};

use crate::options::ValidateOptions;

/// Each in-scope document's own structural rules
pub fn check_basic(opts: &ValidateOptions) -> Vec<ErrorTree> {
    opts.current
        .select(&opts.scope)
        .map(|(path, doc)| {
            let label = if doc.name().is_empty() { path } else { doc.name() };
            ErrorTree::node(
                label,
                doc.validate()
                    .into_iter()
                    .map(|v| ErrorTree::bare(v.into()))
                    .collect(),
            )
        })
        .collect()
}

/// Storage name must be `<package>.advisories.yaml`
pub fn check_naming(opts: &ValidateOptions) -> Vec<ErrorTree> {
    opts.current
        .select(&opts.scope)
        .filter_map(|(path, doc)| {
            let expected = doc.expected_file_name();
            let file_name = path.rsplit('/').next().unwrap_or(path);
            (file_name != expected).then(|| {
                ErrorTree::bare(ValidationError::NamingMismatch {
                    found: path.to_string(),
                    expected,
                })
            })
        })
        .collect()
}

/// Advisory IDs are unique across every in-scope document.
///
/// Out-of-scope documents are not scanned at all.
pub fn check_uniqueness(opts: &ValidateOptions) -> Vec<ErrorTree> {
    let mut seen: HashMap<&str, Vec<String>> = HashMap::new();
    let mut errors = Vec::new();

    for (path, doc) in opts.current.select(&opts.scope) {
        for adv in &doc.advisories {
            let locations = seen.entry(adv.id.as_str()).or_default();
            if !locations.is_empty() {
                errors.push(ErrorTree::bare(ValidationError::DuplicateAdvisoryId {
                    id: adv.id.clone(),
                    path: path.to_string(),
                    seen_in: locations.clone(),
                }));
            }
            locations.push(path.to_string());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use advguard_core::{Advisory, Document, Event, EventData, PackageScope, Snapshot};
    use chrono::{TimeZone, Utc};

    fn doc(package: &str, ids: &[&str]) -> Document {
        ids.iter().fold(Document::new(package), |d, id| {
            d.with_advisory(Advisory::new(*id).with_event(Event::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                EventData::Detection {
                    detection_type: "manual".to_string(),
                },
            )))
        })
    }

    #[test]
    fn test_naming_mismatch_reports_both_names() {
        let mut snap = Snapshot::new();
        snap.insert("curl.advisories.yaml", doc("curl", &["CVE-2024-0001"]));
        snap.insert("libcurl.advisories.yaml", doc("curl-dev", &["CVE-2024-0002"]));

        let errors = check_naming(&ValidateOptions::new(snap));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].error(),
            Some(&ValidationError::NamingMismatch {
                found: "libcurl.advisories.yaml".to_string(),
                expected: "curl-dev.advisories.yaml".to_string(),
            })
        );
    }

    #[test]
    fn test_uniqueness_lists_all_prior_locations() {
        let snap = Snapshot::from_documents([
            doc("a", &["CVE-2024-0001"]),
            doc("b", &["CVE-2024-0001"]),
            doc("c", &["CVE-2024-0001"]),
        ]);

        let errors = check_uniqueness(&ValidateOptions::new(snap));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[1].error(),
            Some(&ValidationError::DuplicateAdvisoryId {
                id: "CVE-2024-0001".to_string(),
                path: "c.advisories.yaml".to_string(),
                seen_in: vec!["a.advisories.yaml".to_string(), "b.advisories.yaml".to_string()],
            })
        );
    }

    #[test]
    fn test_uniqueness_ignores_out_of_scope_documents() {
        let snap = Snapshot::from_documents([
            doc("a", &["CVE-2024-0001"]),
            doc("b", &["CVE-2024-0001"]),
        ]);
        let opts = ValidateOptions::new(snap).with_scope(PackageScope::only(["a"]));

        assert!(check_uniqueness(&opts).is_empty());
    }

    #[test]
    fn test_basic_labels_by_package() {
        let snap = Snapshot::from_documents([doc("curl", &["not-an-id"])]);
        let trees = check_basic(&ValidateOptions::new(snap));
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].label(), "curl");
        assert_eq!(trees[0].error_count(), 1);
    }
}
