//! Error handling for advguard-store
//!
//! Wraps advguard-core AgError with loader-specific helpers

use std::path::Path;

use advguard_core::errors::{AgError, AgErrorKind};

/// Result type alias using AgError
pub type Result<T> = std::result::Result<T, AgError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> AgError {
    let kind = match err.kind() {
        std::io::ErrorKind::NotFound => AgErrorKind::NotFound,
        _ => AgErrorKind::Io,
    };
    AgError::new(kind)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a parse error for a file
pub fn parse_error(operation: &str, path: &Path, reason: impl std::fmt::Display) -> AgError {
    AgError::new(AgErrorKind::Parse)
        .with_op(operation)
        .with_path(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create a parse error for a numbered line of input
pub fn line_error(operation: &str, line: usize, reason: &str) -> AgError {
    AgError::new(AgErrorKind::Parse)
        .with_op(operation)
        .with_message(format!("line {}: {}", line, reason))
}

/// Paths of regular files in `dir` whose name ends with `suffix`, sorted by name
pub(crate) fn files_with_suffix(
    operation: &str,
    dir: &Path,
    suffix: &str,
) -> Result<Vec<std::path::PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(operation, dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error(operation, dir, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(suffix))
            .unwrap_or(false);
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let err = io_error(
            "load_snapshot",
            Path::new("advisories"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.kind(), AgErrorKind::NotFound);
        assert_eq!(err.path(), Some("advisories"));
    }

    #[test]
    fn test_line_error_message() {
        let err = line_error("parse_apkindex", 7, "record without package name");
        assert_eq!(err.code(), "ERR_PARSE");
        assert_eq!(err.message(), "line 7: record without package name");
    }
}
