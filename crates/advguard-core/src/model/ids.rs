//! Vulnerability identifier shapes
//!
//! Advisory IDs follow one of three schemes: `CVE-YYYY-NNNN+`,
//! `GHSA-xxxx-xxxx-xxxx`, or the distro-internal `CGA-xxxx-xxxx-xxxx`.
//! The GHSA and CGA segments draw from the same restricted alphabet.

use serde::{Deserialize, Serialize};

const SEGMENT_ALPHABET: &str = "23456789cfghjmpqrvwx";

/// Identifier scheme of an advisory ID or alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdScheme {
    Cve,
    Ghsa,
    Internal,
}

impl IdScheme {
    /// Classify an ID by its prefix alone, without checking the rest of it.
    ///
    /// The alias policy keys off the prefix, so a malformed `CVE-` id is still
    /// treated as CVE-shaped there (the structural check reports the format).
    pub fn of_prefix(id: &str) -> Option<Self> {
        if id.starts_with("CVE-") {
            Some(IdScheme::Cve)
        } else if id.starts_with("GHSA-") {
            Some(IdScheme::Ghsa)
        } else if id.starts_with("CGA-") {
            Some(IdScheme::Internal)
        } else {
            None
        }
    }

    /// Classify a fully well-formed ID, returning `None` if it matches no scheme.
    pub fn parse(id: &str) -> Option<Self> {
        if is_cve(id) {
            Some(IdScheme::Cve)
        } else if is_segmented(id, "GHSA-") {
            Some(IdScheme::Ghsa)
        } else if is_segmented(id, "CGA-") {
            Some(IdScheme::Internal)
        } else {
            None
        }
    }
}

/// `CVE-` + 4-digit year + `-` + at least 4 digits
pub fn is_cve(id: &str) -> bool {
    let Some(rest) = id.strip_prefix("CVE-") else {
        return false;
    };
    let Some((year, seq)) = rest.split_once('-') else {
        return false;
    };
    year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && seq.len() >= 4
        && seq.bytes().all(|b| b.is_ascii_digit())
}

/// `GHSA-xxxx-xxxx-xxxx`
pub fn is_ghsa(id: &str) -> bool {
    is_segmented(id, "GHSA-")
}

fn is_segmented(id: &str, prefix: &str) -> bool {
    let Some(rest) = id.strip_prefix(prefix) else {
        return false;
    };
    let segments: Vec<&str> = rest.split('-').collect();
    segments.len() == 3
        && segments
            .iter()
            .all(|s| s.len() == 4 && s.chars().all(|c| SEGMENT_ALPHABET.contains(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cve_shapes() {
        assert!(is_cve("CVE-2024-1234"));
        assert!(is_cve("CVE-2021-44228"));
        assert!(!is_cve("CVE-2024-1"));
        assert!(!is_cve("CVE-24-1234"));
        assert!(!is_cve("cve-2024-1234"));
        assert!(!is_cve("CVE-2024-12a4"));
    }

    #[test]
    fn test_ghsa_shapes() {
        assert!(is_ghsa("GHSA-2cfg-hjmp-qrvw"));
        assert!(!is_ghsa("GHSA-aaaa-bbbb-cccc"));
        assert!(!is_ghsa("GHSA-2cfg-hjmp"));
    }

    #[test]
    fn test_scheme_parse() {
        assert_eq!(IdScheme::parse("CVE-2023-0001"), Some(IdScheme::Cve));
        assert_eq!(IdScheme::parse("GHSA-2cfg-hjmp-qrvw"), Some(IdScheme::Ghsa));
        assert_eq!(IdScheme::parse("CGA-2cfg-hjmp-qrvw"), Some(IdScheme::Internal));
        assert_eq!(IdScheme::parse("OSV-2023-1"), None);
    }

    #[test]
    fn test_prefix_is_lenient() {
        assert_eq!(IdScheme::of_prefix("CVE-2024-1"), Some(IdScheme::Cve));
        assert_eq!(IdScheme::of_prefix("GHSA-bbbb"), Some(IdScheme::Ghsa));
        assert_eq!(IdScheme::of_prefix("RUSTSEC-2024-0001"), None);
    }
}
