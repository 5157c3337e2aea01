//! Every `fixed` event names a version that was actually published

use advguard_core::{ErrorTree, ValidationError};

use crate::checks::event_label;
use crate::options::ValidateOptions;

/// Reports per event, so one bad event does not hide its siblings.
pub fn check_fixed_versions(opts: &ValidateOptions) -> Vec<ErrorTree> {
    let Some(index) = opts.package_index.as_ref() else {
        return Vec::new();
    };

    opts.current
        .select(&opts.scope)
        .map(|(_, doc)| {
            let published = index.contains_package(doc.name());
            let advisories = doc
                .advisories
                .iter()
                .map(|adv| {
                    let events = adv
                        .events
                        .iter()
                        .enumerate()
                        .filter_map(|(i, event)| {
                            let version = event.fixed_version()?;
                            let error = if !published {
                                ValidationError::PackageNotInIndex
                            } else if index.contains_version(doc.name(), version) {
                                return None;
                            } else {
                                ValidationError::FixedVersionNotFound {
                                    version: version.to_string(),
                                }
                            };
                            Some(ErrorTree::leaf(event_label(i, event), error))
                        })
                        .collect();
                    ErrorTree::node(&adv.id, events)
                })
                .collect();
            ErrorTree::node(doc.name(), advisories)
        })
        .collect()
}
