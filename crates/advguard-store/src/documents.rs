//! Advisory document directories

use std::fs;
use std::path::Path;

use advguard_core::model::DOCUMENT_SUFFIX;
use advguard_core::{Document, Snapshot};

use crate::errors::{files_with_suffix, io_error, parse_error, Result};

/// Parse one advisory document from YAML text
pub fn parse_document(content: &str, path: &Path) -> Result<Document> {
    serde_yaml::from_str(content).map_err(|e| parse_error("parse_document", path, e))
}

/// Load every `*.advisories.yaml` directly inside `dir`.
///
/// Entries are keyed by file name. Subdirectories are not searched.
pub fn load_snapshot(dir: &Path) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    for path in files_with_suffix("load_snapshot", dir, DOCUMENT_SUFFIX)? {
        let content = fs::read_to_string(&path).map_err(|e| io_error("load_snapshot", &path, e))?;
        let document = parse_document(&content, &path)?;
        let key = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        snapshot.insert(key, document);
    }

    tracing::debug!(
        dir = %dir.display(),
        document_count = snapshot.len(),
        "loaded advisory documents"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advguard_core::EventKind;

    const CURL: &str = r#"
schema-version: "2"
package:
  name: curl
advisories:
  - id: CVE-2024-0001
    aliases:
      - GHSA-2cfg-hjmp-qrvw
    events:
      - timestamp: 2024-01-01T00:00:00Z
        type: detection
        data:
          type: manual
      - timestamp: 2024-01-02T00:00:00Z
        type: fixed
        data:
          fixed-version: 8.0.1-r0
      - timestamp: 2024-01-03T00:00:00Z
        type: pending-upstream-fix
"#;

    #[test]
    fn test_parse_document() {
        let doc = parse_document(CURL, Path::new("curl.advisories.yaml")).unwrap();
        assert_eq!(doc.name(), "curl");
        let adv = doc.advisory("CVE-2024-0001").unwrap();
        assert!(adv.has_alias("GHSA-2cfg-hjmp-qrvw"));
        assert_eq!(adv.events.len(), 3);
        assert_eq!(adv.events[1].fixed_version(), Some("8.0.1-r0"));
        assert_eq!(adv.events[2].kind(), EventKind::PendingUpstreamFix);
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = parse_document("package: [", Path::new("bad.advisories.yaml")).unwrap_err();
        assert_eq!(err.code(), "ERR_PARSE");
        assert_eq!(err.path(), Some("bad.advisories.yaml"));
    }
}
