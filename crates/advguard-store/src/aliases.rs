//! Static alias table
//!
//! A JSON object mapping each CVE to its GHSA identifiers:
//!
//! ```json
//! { "CVE-2024-0001": ["GHSA-2cfg-hjmp-qrvw"] }
//! ```
//!
//! The GHSA to CVE direction is derived from the same table.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use advguard_core::errors::AliasLookupError;
use advguard_core::AliasResolver;
use async_trait::async_trait;

use crate::errors::{io_error, parse_error, Result};

#[derive(Debug, Clone, Default)]
pub struct StaticAliasResolver {
    ghsas_by_cve: BTreeMap<String, Vec<String>>,
    cve_by_ghsa: HashMap<String, String>,
}

impl StaticAliasResolver {
    pub fn from_table(table: BTreeMap<String, Vec<String>>) -> Self {
        let cve_by_ghsa = table
            .iter()
            .flat_map(|(cve, ghsas)| ghsas.iter().map(move |g| (g.clone(), cve.clone())))
            .collect();
        Self {
            ghsas_by_cve: table,
            cve_by_ghsa,
        }
    }

    pub fn parse_json(content: &str, path: &Path) -> Result<Self> {
        let table: BTreeMap<String, Vec<String>> =
            serde_json::from_str(content).map_err(|e| parse_error("load_alias_table", path, e))?;
        Ok(Self::from_table(table))
    }

    /// Read an alias table file
    pub fn from_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| io_error("load_alias_table", path, e))?;
        let resolver = Self::parse_json(&content, path)?;
        tracing::debug!(
            path = %path.display(),
            cve_count = resolver.ghsas_by_cve.len(),
            "loaded alias table"
        );
        Ok(resolver)
    }
}

#[async_trait]
impl AliasResolver for StaticAliasResolver {
    async fn ghsas_for_cve(&self, cve: &str) -> std::result::Result<Vec<String>, AliasLookupError> {
        Ok(self.ghsas_by_cve.get(cve).cloned().unwrap_or_default())
    }

    async fn cve_for_ghsa(&self, ghsa: &str) -> std::result::Result<Option<String>, AliasLookupError> {
        Ok(self.cve_by_ghsa.get(ghsa).cloned())
    }

    fn name(&self) -> &str {
        "static-table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_both_directions() {
        let resolver = StaticAliasResolver::parse_json(
            r#"{"CVE-2024-0001": ["GHSA-2cfg-hjmp-qrvw", "GHSA-3fgh-jmpq-rvwx"]}"#,
            Path::new("aliases.json"),
        )
        .unwrap();

        assert_eq!(resolver.ghsas_for_cve("CVE-2024-0001").await.unwrap().len(), 2);
        assert!(resolver.ghsas_for_cve("CVE-2024-9999").await.unwrap().is_empty());
        assert_eq!(
            resolver.cve_for_ghsa("GHSA-3fgh-jmpq-rvwx").await.unwrap(),
            Some("CVE-2024-0001".to_string())
        );
        assert_eq!(resolver.cve_for_ghsa("GHSA-xxxx-xxxx-xxxx").await.unwrap(), None);
    }

    #[test]
    fn test_malformed_table() {
        let err = StaticAliasResolver::parse_json(r#"{"CVE-2024-0001": "GHSA"}"#, Path::new("a.json"))
            .unwrap_err();
        assert_eq!(err.code(), "ERR_PARSE");
    }
}
