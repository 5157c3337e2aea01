//! Inputs of a validation run

use std::sync::Arc;
use std::time::Duration as StdDuration;

use advguard_core::{AliasResolver, BuildConfigIndex, PackageIndex, PackageScope, Snapshot};
use advguard_core_types::RunContext;
use chrono::{DateTime, Duration, Utc};

/// Newly added events must be younger than this many days.
pub const DEFAULT_RECENCY_DAYS: i64 = 3;

/// Upper bound on the whole alias pass, in seconds.
pub const DEFAULT_ALIAS_TIMEOUT_SECS: u64 = 30;

/// Everything one validation run reads.
///
/// Each optional dataset gates the checks that need it: a `None` here means
/// the check is skipped, never that it fails.
#[derive(Clone)]
pub struct ValidateOptions {
    pub run: RunContext,
    pub current: Snapshot,
    pub baseline: Option<Snapshot>,
    pub scope: PackageScope,
    /// Reference clock for the recency rule
    pub now: DateTime<Utc>,
    pub build_configs: Option<BuildConfigIndex>,
    pub package_index: Option<PackageIndex>,
    pub alias_resolver: Option<Arc<dyn AliasResolver>>,
    pub recency_window: Duration,
    pub alias_timeout: StdDuration,
}

impl ValidateOptions {
    pub fn new(current: Snapshot) -> Self {
        Self {
            run: RunContext::new(),
            current,
            baseline: None,
            scope: PackageScope::all(),
            now: Utc::now(),
            build_configs: None,
            package_index: None,
            alias_resolver: None,
            recency_window: Duration::days(DEFAULT_RECENCY_DAYS),
            alias_timeout: StdDuration::from_secs(DEFAULT_ALIAS_TIMEOUT_SECS),
        }
    }

    pub fn with_run_context(mut self, run: RunContext) -> Self {
        self.run = run;
        self
    }

    pub fn with_baseline(mut self, baseline: Snapshot) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_scope(mut self, scope: PackageScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_build_configs(mut self, build_configs: BuildConfigIndex) -> Self {
        self.build_configs = Some(build_configs);
        self
    }

    pub fn with_package_index(mut self, package_index: PackageIndex) -> Self {
        self.package_index = Some(package_index);
        self
    }

    pub fn with_alias_resolver(mut self, resolver: Arc<dyn AliasResolver>) -> Self {
        self.alias_resolver = Some(resolver);
        self
    }

    pub fn with_recency_window(mut self, window: Duration) -> Self {
        self.recency_window = window;
        self
    }

    pub fn with_alias_timeout(mut self, timeout: StdDuration) -> Self {
        self.alias_timeout = timeout;
        self
    }

    /// `true` when `timestamp` falls inside the recency window before `now`
    pub fn is_recent(&self, timestamp: DateTime<Utc>) -> bool {
        self.now - timestamp < self.recency_window
    }
}

impl std::fmt::Debug for ValidateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidateOptions")
            .field("run", &self.run)
            .field("current", &self.current.len())
            .field("baseline", &self.baseline.as_ref().map(Snapshot::len))
            .field("scope", &self.scope)
            .field("now", &self.now)
            .field("build_configs", &self.build_configs.as_ref().map(BuildConfigIndex::len))
            .field("package_index", &self.package_index.as_ref().map(PackageIndex::record_count))
            .field("alias_resolver", &self.alias_resolver.as_ref().map(|r| r.name().to_string()))
            .field("recency_window", &self.recency_window)
            .field("alias_timeout", &self.alias_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_recency_window_is_exclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let opts = ValidateOptions::new(Snapshot::new()).with_now(now);

        assert!(opts.is_recent(now));
        assert!(opts.is_recent(now - Duration::days(3) + Duration::seconds(1)));
        assert!(!opts.is_recent(now - Duration::days(3)));
        assert!(!opts.is_recent(now - Duration::days(4)));
    }

    #[test]
    fn test_defaults_skip_every_dataset() {
        let opts = ValidateOptions::new(Snapshot::new());
        assert!(opts.baseline.is_none());
        assert!(opts.build_configs.is_none());
        assert!(opts.package_index.is_none());
        assert!(opts.alias_resolver.is_none());
        assert!(opts.scope.is_unrestricted());
    }
}
