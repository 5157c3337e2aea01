//! Build configuration directories
//!
//! Only the existence of a package definition matters, so each file is
//! reduced to its `package.name`.

use std::fs;
use std::path::Path;

use advguard_core::BuildConfigIndex;
use serde::Deserialize;

use crate::errors::{files_with_suffix, io_error, parse_error, Result};

#[derive(Debug, Deserialize)]
struct BuildConfigHeader {
    package: Option<PackageHeader>,
}

#[derive(Debug, Deserialize)]
struct PackageHeader {
    name: String,
}

/// Collect package names from every `*.yaml` file directly inside `dir`.
///
/// Files without a `package` block (pipelines, shared fragments) are ignored.
/// Advisory documents living in the same directory are skipped.
pub fn load_build_configs(dir: &Path) -> Result<BuildConfigIndex> {
    let mut index = BuildConfigIndex::default();
    for path in files_with_suffix("load_build_configs", dir, ".yaml")? {
        let is_advisory = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(advguard_core::model::DOCUMENT_SUFFIX))
            .unwrap_or(false);
        if is_advisory {
            continue;
        }

        let content =
            fs::read_to_string(&path).map_err(|e| io_error("load_build_configs", &path, e))?;
        let header: BuildConfigHeader = serde_yaml::from_str(&content)
            .map_err(|e| parse_error("load_build_configs", &path, e))?;
        if let Some(package) = header.package {
            index.insert(package.name);
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        package_count = index.len(),
        "loaded build configurations"
    );
    Ok(index)
}
