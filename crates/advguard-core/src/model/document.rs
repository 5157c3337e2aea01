use serde::{Deserialize, Serialize};

use super::advisory::Advisory;
use crate::rules::structural::{self, StructuralViolation};

/// File name suffix every advisory document carries
pub const DOCUMENT_SUFFIX: &str = ".advisories.yaml";

pub const DEFAULT_SCHEMA_VERSION: &str = "2";

/// Package identity of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
}

/// All advisories recorded for one package
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Document {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    pub package: Package,

    #[serde(default)]
    pub advisories: Vec<Advisory>,
}

fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

impl Document {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            schema_version: default_schema_version(),
            package: Package {
                name: package_name.into(),
            },
            advisories: Vec::new(),
        }
    }

    pub fn with_advisory(mut self, advisory: Advisory) -> Self {
        self.advisories.push(advisory);
        self
    }

    /// The document's identity: its package name
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// The storage name this document is expected to live under
    pub fn expected_file_name(&self) -> String {
        format!("{}{}", self.package.name, DOCUMENT_SUFFIX)
    }

    pub fn advisory(&self, id: &str) -> Option<&Advisory> {
        self.advisories.iter().find(|a| a.id == id)
    }

    /// Run the document's own self-consistency checks.
    ///
    /// Returns every violation found; an empty list means the document is valid.
    pub fn validate(&self) -> Vec<StructuralViolation> {
        structural::validate_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_file_name() {
        assert_eq!(Document::new("curl").expected_file_name(), "curl.advisories.yaml");
    }

    #[test]
    fn test_schema_version_defaults() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "package": { "name": "curl" }
        }))
        .unwrap();
        assert_eq!(doc.schema_version, DEFAULT_SCHEMA_VERSION);
        assert!(doc.advisories.is_empty());
    }

    #[test]
    fn test_advisory_lookup() {
        let doc = Document::new("curl").with_advisory(Advisory::new("CVE-2024-0001"));
        assert!(doc.advisory("CVE-2024-0001").is_some());
        assert!(doc.advisory("CVE-2024-0002").is_none());
    }
}
