//! Package selection scope
//!
//! The scope is decided once per run and applied uniformly by every check.

use std::collections::BTreeSet;

/// Set of packages a validation run operates on.
///
/// An empty selection means every package is in scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageScope {
    selected: BTreeSet<String>,
}

impl PackageScope {
    /// Scope covering every package
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope restricted to the named packages (empty input means all)
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.selected.is_empty() || self.selected.contains(package)
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}
