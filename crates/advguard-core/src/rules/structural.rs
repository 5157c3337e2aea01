//! Self-consistency contract of a single advisory document
//!
//! Every rule reports all of its violations rather than stopping at the
//! first, so one run surfaces everything an author has to fix.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{ids, Document, EventData, IdScheme};

/// A violation of a document's own structural rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    #[error("package name must not be empty")]
    EmptyPackageName,

    #[error("advisory ID {id:?} is not a valid CVE, GHSA, or CGA identifier")]
    InvalidAdvisoryId { id: String },

    #[error("advisory ID {id:?} appears more than once in this document")]
    DuplicateAdvisoryInDocument { id: String },

    #[error("advisory {advisory_id}: alias {alias:?} is not a valid CVE or GHSA identifier")]
    InvalidAlias { advisory_id: String, alias: String },

    #[error("advisory {advisory_id}: alias {alias:?} duplicates the advisory ID")]
    AliasIsAdvisoryId { advisory_id: String, alias: String },

    #[error("advisory {advisory_id}: alias {alias:?} is listed more than once")]
    DuplicateAlias { advisory_id: String, alias: String },

    #[error("advisory {advisory_id}: must have at least one event")]
    NoEvents { advisory_id: String },

    #[error("advisory {advisory_id}: event {index} (type: fixed) has an empty fixed version")]
    EmptyFixedVersion { advisory_id: String, index: usize },

    #[error("advisory {advisory_id}: event {index} (type: false-positive-determination) has an empty false positive type")]
    EmptyFalsePositiveType { advisory_id: String, index: usize },

    #[error("advisory {advisory_id}: event {index} has an unset timestamp")]
    UnsetTimestamp { advisory_id: String, index: usize },
}

/// Validate a document against its structural rules.
///
/// Event indexes in violations are 1-based, matching report labels.
pub fn validate_document(doc: &Document) -> Vec<StructuralViolation> {
    let mut violations = Vec::new();

    if doc.package.name.trim().is_empty() {
        violations.push(StructuralViolation::EmptyPackageName);
    }

    let mut seen_ids = HashSet::new();
    for adv in &doc.advisories {
        if IdScheme::parse(&adv.id).is_none() {
            violations.push(StructuralViolation::InvalidAdvisoryId { id: adv.id.clone() });
        }
        if !seen_ids.insert(adv.id.as_str()) {
            violations.push(StructuralViolation::DuplicateAdvisoryInDocument {
                id: adv.id.clone(),
            });
        }

        let mut seen_aliases = HashSet::new();
        for alias in &adv.aliases {
            if alias == &adv.id {
                violations.push(StructuralViolation::AliasIsAdvisoryId {
                    advisory_id: adv.id.clone(),
                    alias: alias.clone(),
                });
            } else if !(ids::is_cve(alias) || ids::is_ghsa(alias)) {
                violations.push(StructuralViolation::InvalidAlias {
                    advisory_id: adv.id.clone(),
                    alias: alias.clone(),
                });
            }
            if !seen_aliases.insert(alias.as_str()) {
                violations.push(StructuralViolation::DuplicateAlias {
                    advisory_id: adv.id.clone(),
                    alias: alias.clone(),
                });
            }
        }

        if adv.events.is_empty() {
            violations.push(StructuralViolation::NoEvents {
                advisory_id: adv.id.clone(),
            });
        }

        for (i, event) in adv.events.iter().enumerate() {
            let index = i + 1;
            if event.timestamp <= DateTime::<Utc>::UNIX_EPOCH {
                violations.push(StructuralViolation::UnsetTimestamp {
                    advisory_id: adv.id.clone(),
                    index,
                });
            }
            match &event.data {
                EventData::Fixed { fixed_version } if fixed_version.trim().is_empty() => {
                    violations.push(StructuralViolation::EmptyFixedVersion {
                        advisory_id: adv.id.clone(),
                        index,
                    });
                }
                EventData::FalsePositiveDetermination { fp_type, .. }
                    if fp_type.trim().is_empty() =>
                {
                    violations.push(StructuralViolation::EmptyFalsePositiveType {
                        advisory_id: adv.id.clone(),
                        index,
                    });
                }
                _ => {}
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Advisory, Event};
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_document_has_no_violations() {
        let doc = Document::new("curl").with_advisory(
            Advisory::new("CVE-2024-0001")
                .with_aliases(["GHSA-2cfg-hjmp-qrvw"])
                .with_event(Event::fixed(ts(), "8.0.1-r0")),
        );
        assert!(validate_document(&doc).is_empty());
    }

    #[test]
    fn test_reports_every_violation() {
        let doc = Document::new("").with_advisory(
            Advisory::new("NOT-AN-ID").with_aliases(["NOT-AN-ID", "bogus", "bogus"]),
        );
        let violations = validate_document(&doc);

        assert!(violations.contains(&StructuralViolation::EmptyPackageName));
        assert!(violations.contains(&StructuralViolation::InvalidAdvisoryId {
            id: "NOT-AN-ID".into()
        }));
        assert!(violations.contains(&StructuralViolation::AliasIsAdvisoryId {
            advisory_id: "NOT-AN-ID".into(),
            alias: "NOT-AN-ID".into()
        }));
        assert!(violations.contains(&StructuralViolation::DuplicateAlias {
            advisory_id: "NOT-AN-ID".into(),
            alias: "bogus".into()
        }));
        assert!(violations.contains(&StructuralViolation::NoEvents {
            advisory_id: "NOT-AN-ID".into()
        }));
    }

    #[test]
    fn test_duplicate_advisory_within_document() {
        let adv = Advisory::new("CVE-2024-0001").with_event(Event::fixed(ts(), "1.0-r0"));
        let doc = Document::new("curl")
            .with_advisory(adv.clone())
            .with_advisory(adv);
        assert_eq!(
            validate_document(&doc),
            vec![StructuralViolation::DuplicateAdvisoryInDocument {
                id: "CVE-2024-0001".into()
            }]
        );
    }

    #[test]
    fn test_empty_fixed_version_and_epoch_timestamp() {
        let doc = Document::new("curl").with_advisory(
            Advisory::new("CVE-2024-0001").with_event(Event::fixed(DateTime::<Utc>::UNIX_EPOCH, " ")),
        );
        let violations = validate_document(&doc);
        assert_eq!(violations.len(), 2);
        assert!(violations.contains(&StructuralViolation::UnsetTimestamp {
            advisory_id: "CVE-2024-0001".into(),
            index: 1
        }));
    }
}
