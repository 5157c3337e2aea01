//! advguard Store - loaders for advisory documents and reference datasets
//!
//! Provides:
//! - Advisory document directories (YAML) as snapshots
//! - Build configuration directories, reduced to package names
//! - APKINDEX-format published package indexes
//! - A static JSON alias table implementing the alias resolver

pub mod aliases;
pub mod apkindex;
pub mod build_configs;
pub mod documents;
pub mod errors;

// Re-export key types
pub use aliases::StaticAliasResolver;
pub use apkindex::{load_package_index, parse_apkindex};
pub use build_configs::load_build_configs;
pub use documents::{load_snapshot, parse_document};
pub use errors::Result;
