//! APKINDEX package indexes
//!
//! The text format is a sequence of records separated by blank lines. Each
//! line is `K:value`; only `P` (name) and `V` (version) are read.

use std::fs;
use std::path::Path;

use advguard_core::{PackageIndex, PublishedPackage};

use crate::errors::{io_error, line_error, Result};

pub fn parse_apkindex(content: &str) -> Result<PackageIndex> {
    let mut index = PackageIndex::new();
    let mut name: Option<String> = None;
    let mut version: Option<String> = None;
    let mut record_start = 1;

    let mut flush = |name: &mut Option<String>, version: &mut Option<String>, start: usize| {
        match (name.take(), version.take()) {
            (Some(n), Some(v)) => {
                index.insert(PublishedPackage::new(n, v));
                Ok(())
            }
            (None, None) => Ok(()),
            (None, Some(_)) => Err(line_error("parse_apkindex", start, "record without package name")),
            (Some(n), None) => Err(line_error(
                "parse_apkindex",
                start,
                &format!("record for {} without version", n),
            )),
        }
    };

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            flush(&mut name, &mut version, record_start)?;
            record_start = line_no + 1;
            continue;
        }
        match line.split_once(':') {
            Some(("P", value)) => name = Some(value.to_string()),
            Some(("V", value)) => version = Some(value.to_string()),
            _ => {}
        }
    }
    flush(&mut name, &mut version, record_start)?;

    Ok(index)
}

/// Read and parse an APKINDEX text file
pub fn load_package_index(path: &Path) -> Result<PackageIndex> {
    let content = fs::read_to_string(path).map_err(|e| io_error("load_package_index", path, e))?;
    let index = parse_apkindex(&content).map_err(|e| e.with_path(path.display().to_string()))?;
    tracing::debug!(
        path = %path.display(),
        record_count = index.record_count(),
        "loaded package index"
    );
    Ok(index)
}
