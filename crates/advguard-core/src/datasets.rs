//! External reference datasets
//!
//! Each dataset is optional for a run. Its presence decides which checks
//! execute; none of them is ever written to.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AliasLookupError;

/// Names of packages with a current build definition in the distro.
///
/// Only existence is consulted, never the configuration's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfigIndex {
    packages: BTreeSet<String>,
}

impl BuildConfigIndex {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, package: impl Into<String>) {
        self.packages.insert(package.into());
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// One published (name, version) record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublishedPackage {
    pub name: String,
    pub version: String,
}

impl PublishedPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Published package versions grouped by package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIndex {
    by_name: BTreeMap<String, Vec<PublishedPackage>>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_packages<I>(packages: I) -> Self
    where
        I: IntoIterator<Item = PublishedPackage>,
    {
        let mut index = Self::new();
        for pkg in packages {
            index.insert(pkg);
        }
        index
    }

    pub fn insert(&mut self, package: PublishedPackage) {
        self.by_name
            .entry(package.name.clone())
            .or_default()
            .push(package);
    }

    /// Published records for a package, or `None` if the package was never published
    pub fn versions(&self, name: &str) -> Option<&[PublishedPackage]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    pub fn contains_package(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn contains_version(&self, name: &str, version: &str) -> bool {
        self.versions(name)
            .map(|records| records.iter().any(|p| p.version == version))
            .unwrap_or(false)
    }

    /// Number of (name, version) records
    pub fn record_count(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Vulnerability alias resolution service (CVE ↔ GHSA).
///
/// Implementations may perform network I/O; callers memoise per run.
#[async_trait]
pub trait AliasResolver: Send + Sync {
    /// All GHSA identifiers known to correspond to a CVE
    async fn ghsas_for_cve(&self, cve: &str) -> Result<Vec<String>, AliasLookupError>;

    /// The CVE corresponding to a GHSA, if one exists
    async fn cve_for_ghsa(&self, ghsa: &str) -> Result<Option<String>, AliasLookupError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
