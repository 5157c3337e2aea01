//! Immutable view of a document set at one point in time

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::document::Document;
use crate::scope::PackageScope;

/// Path-addressable, ordered collection of documents.
///
/// Entries are kept in path order so that every iteration over a snapshot
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<String, Document>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot storing each document under its expected file name
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let mut snapshot = Self::new();
        for doc in documents {
            snapshot.insert(doc.expected_file_name(), doc);
        }
        snapshot
    }

    /// Insert a document at a path, replacing any document already there
    pub fn insert(&mut self, path: impl Into<String>, document: Document) {
        self.entries.insert(path.into(), document);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (path, document) pairs in path order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d))
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.entries.values()
    }

    /// Entries whose package falls inside the scope
    pub fn select<'a>(
        &'a self,
        scope: &'a PackageScope,
    ) -> impl Iterator<Item = (&'a str, &'a Document)> + 'a {
        self.entries().filter(move |(_, d)| scope.contains(d.name()))
    }

    /// Documents keyed by package name.
    ///
    /// When two paths claim the same package, the first in path order wins.
    pub fn by_package(&self) -> BTreeMap<&str, &Document> {
        let mut map = BTreeMap::new();
        for doc in self.entries.values() {
            if let Entry::Vacant(slot) = map.entry(doc.name()) {
                slot.insert(doc);
            }
        }
        map
    }

    pub fn get_by_package(&self, name: &str) -> Option<&Document> {
        self.entries.values().find(|d| d.name() == name)
    }
}

impl FromIterator<(String, Document)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, Document)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_path_ordered() {
        let snapshot = Snapshot::from_documents([Document::new("zlib"), Document::new("curl")]);
        let paths: Vec<&str> = snapshot.entries().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["curl.advisories.yaml", "zlib.advisories.yaml"]);
    }

    #[test]
    fn test_select_honours_scope() {
        let snapshot = Snapshot::from_documents([Document::new("zlib"), Document::new("curl")]);
        let scope = PackageScope::only(["zlib"]);
        let names: Vec<&str> = snapshot.select(&scope).map(|(_, d)| d.name()).collect();
        assert_eq!(names, vec!["zlib"]);
    }

    #[test]
    fn test_by_package_first_path_wins() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("a.advisories.yaml", Document::new("dup").with_advisory(
            crate::model::Advisory::new("CVE-2024-0001"),
        ));
        snapshot.insert("b.advisories.yaml", Document::new("dup"));

        let map = snapshot.by_package();
        assert_eq!(map.len(), 1);
        assert_eq!(map["dup"].advisories.len(), 1);
    }
}
