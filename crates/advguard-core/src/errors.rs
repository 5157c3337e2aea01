use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::rules::structural::StructuralViolation;

/// Result type alias using AgError
pub type Result<T> = std::result::Result<T, AgError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every policy violation and every operational failure maps to one kind,
/// and every kind has a stable code usable in tests, logs and CI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgErrorKind {
    // Policy violations
    StructuralViolation,
    NamingMismatch,
    DuplicateAdvisoryId,
    DocumentRemoved,
    AdvisoryRemoved,
    MissingBuildConfiguration,
    MissingBuildOrIndexLinkage,
    AmbiguousEventChange,
    EventsRemoved,
    StaleNewEvent,
    PackageNotInIndex,
    FixedVersionNotFound,
    AliasMissing,
    AliasPrimaryIdPolicy,

    // External lookups
    /// The alias resolution service failed; the alias pass was aborted
    ExternalLookup,
    /// The run was cancelled or timed out before a pass completed
    Cancelled,

    // Input / IO
    InvalidInput,
    NotFound,
    Io,
    Parse,
    Config,

    // Internal
    Internal,
}

impl AgErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            AgErrorKind::StructuralViolation => "ERR_STRUCTURAL_VIOLATION",
            AgErrorKind::NamingMismatch => "ERR_NAMING_MISMATCH",
            AgErrorKind::DuplicateAdvisoryId => "ERR_DUPLICATE_ADVISORY_ID",
            AgErrorKind::DocumentRemoved => "ERR_DOCUMENT_REMOVED",
            AgErrorKind::AdvisoryRemoved => "ERR_ADVISORY_REMOVED",
            AgErrorKind::MissingBuildConfiguration => "ERR_MISSING_BUILD_CONFIGURATION",
            AgErrorKind::MissingBuildOrIndexLinkage => "ERR_MISSING_BUILD_OR_INDEX_LINKAGE",
            AgErrorKind::AmbiguousEventChange => "ERR_AMBIGUOUS_EVENT_CHANGE",
            AgErrorKind::EventsRemoved => "ERR_EVENTS_REMOVED",
            AgErrorKind::StaleNewEvent => "ERR_STALE_NEW_EVENT",
            AgErrorKind::PackageNotInIndex => "ERR_PACKAGE_NOT_IN_INDEX",
            AgErrorKind::FixedVersionNotFound => "ERR_FIXED_VERSION_NOT_FOUND",
            AgErrorKind::AliasMissing => "ERR_ALIAS_MISSING",
            AgErrorKind::AliasPrimaryIdPolicy => "ERR_ALIAS_PRIMARY_ID_POLICY",
            AgErrorKind::ExternalLookup => "ERR_EXTERNAL_LOOKUP",
            AgErrorKind::Cancelled => "ERR_CANCELLED",
            AgErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            AgErrorKind::NotFound => "ERR_NOT_FOUND",
            AgErrorKind::Io => "ERR_IO",
            AgErrorKind::Parse => "ERR_PARSE",
            AgErrorKind::Config => "ERR_CONFIG",
            AgErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Used for operational failures (loading, parsing, configuration, lookups).
/// Policy violations are [`ValidationError`]s and convert into this type when
/// they need to cross a logging or reporting boundary.
#[derive(Debug, Clone)]
pub struct AgError {
    kind: AgErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<AgError>>,
}

impl AgError {
    /// Create a new error with the specified kind
    pub fn new(kind: AgErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (package name or advisory ID)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: AgError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> AgErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&AgError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for AgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AgError {}

// ========== End Error Facility ==========

/// A single policy violation found by one of the checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document failed its own self-consistency contract
    #[error(transparent)]
    Structural(#[from] StructuralViolation),

    #[error("document file name {found:?} does not match expected name {expected:?}")]
    NamingMismatch { found: String, expected: String },

    #[error("duplicate advisory ID {id:?} (found in {path}, but already seen in: {})", .seen_in.join(", "))]
    DuplicateAdvisoryId {
        id: String,
        path: String,
        seen_in: Vec<String>,
    },

    #[error("document was removed")]
    DocumentRemoved,

    #[error("advisory was removed")]
    AdvisoryRemoved,

    /// A new document has no active build definition behind it
    #[error("package build configuration not found in the distro")]
    MissingBuildConfiguration,

    /// A modified document is backed by neither a build definition nor a published package
    #[error("package not found as a build configuration in the distro or as an entry in the package index")]
    MissingBuildOrIndexLinkage,

    /// Both removed and added events exist, so a modification cannot be told apart
    #[error("one or more events were modified or removed")]
    AmbiguousEventChange,

    #[error("one or more events were removed")]
    EventsRemoved,

    #[error("event's timestamp ({}) set to more than {max_age_days} days ago; timestamps should accurately capture event creation time", .timestamp.to_rfc3339())]
    StaleNewEvent {
        timestamp: DateTime<Utc>,
        max_age_days: i64,
    },

    #[error("package not found in package index")]
    PackageNotInIndex,

    #[error("package version {version:?} not found in package index")]
    FixedVersionNotFound { version: String },

    #[error("missing GHSA alias {alias:?} from set [{}]", .aliases.join(", "))]
    AliasMissing { alias: String, aliases: Vec<String> },

    #[error("{ghsa:?} should be listed as an alias, and {cve:?} should be the advisory ID")]
    AliasPrimaryIdPolicy { ghsa: String, cve: String },
}

impl ValidationError {
    pub fn kind(&self) -> AgErrorKind {
        match self {
            ValidationError::Structural(_) => AgErrorKind::StructuralViolation,
            ValidationError::NamingMismatch { .. } => AgErrorKind::NamingMismatch,
            ValidationError::DuplicateAdvisoryId { .. } => AgErrorKind::DuplicateAdvisoryId,
            ValidationError::DocumentRemoved => AgErrorKind::DocumentRemoved,
            ValidationError::AdvisoryRemoved => AgErrorKind::AdvisoryRemoved,
            ValidationError::MissingBuildConfiguration => AgErrorKind::MissingBuildConfiguration,
            ValidationError::MissingBuildOrIndexLinkage => AgErrorKind::MissingBuildOrIndexLinkage,
            ValidationError::AmbiguousEventChange => AgErrorKind::AmbiguousEventChange,
            ValidationError::EventsRemoved => AgErrorKind::EventsRemoved,
            ValidationError::StaleNewEvent { .. } => AgErrorKind::StaleNewEvent,
            ValidationError::PackageNotInIndex => AgErrorKind::PackageNotInIndex,
            ValidationError::FixedVersionNotFound { .. } => AgErrorKind::FixedVersionNotFound,
            ValidationError::AliasMissing { .. } => AgErrorKind::AliasMissing,
            ValidationError::AliasPrimaryIdPolicy { .. } => AgErrorKind::AliasPrimaryIdPolicy,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<ValidationError> for AgError {
    fn from(err: ValidationError) -> Self {
        let entity = match &err {
            ValidationError::DuplicateAdvisoryId { id, .. } => Some(id.clone()),
            ValidationError::AliasMissing { alias, .. } => Some(alias.clone()),
            ValidationError::AliasPrimaryIdPolicy { ghsa, .. } => Some(ghsa.clone()),
            _ => None,
        };
        let ag = AgError::new(err.kind())
            .with_op("validate")
            .with_message(err.to_string());
        match entity {
            Some(id) => ag.with_entity_id(id),
            None => ag,
        }
    }
}

/// Failure of the vulnerability alias resolution service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasLookupError {
    #[error("alias service error: {0}")]
    Service(String),

    #[error("alias lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<AliasLookupError> for AgError {
    fn from(err: AliasLookupError) -> Self {
        AgError::new(AgErrorKind::ExternalLookup)
            .with_op("alias_lookup")
            .with_message(err.to_string())
    }
}

impl From<serde_json::Error> for AgError {
    fn from(err: serde_json::Error) -> Self {
        AgError::new(AgErrorKind::Parse).with_message(err.to_string())
    }
}
