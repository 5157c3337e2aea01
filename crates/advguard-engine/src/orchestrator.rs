//! Validation orchestrator
//!
//! Checks are declared in [`CHECKS`]. Each row names the dataset it needs;
//! rows whose dataset is absent are skipped and logged, never failed. The
//! synchronous passes run side by side on scoped threads, then the lookup
//! passes run on the async runtime under the caller's cancellation signal
//! and the configured timeout.

use std::future::Future;
use std::thread;
use std::time::Instant;

use advguard_core::errors::AliasLookupError;
use advguard_core::{log_check_skipped, log_op_end, log_op_error, log_op_start, ErrorTree};
use futures::future::BoxFuture;

use crate::checks::{self, alias, AliasCache};
use crate::options::ValidateOptions;
use crate::report::{AbortReason, AbortedPass, SkippedPass, ValidationReport};

/// A pass over borrowed options that cannot fail
pub type SyncCheck = fn(&ValidateOptions) -> Vec<ErrorTree>;

/// A pass that consults the alias service and stops at the first lookup failure
pub type LookupCheck = for<'a> fn(
    &'a ValidateOptions,
    &'a AliasCache,
) -> BoxFuture<'a, Result<Vec<ErrorTree>, AliasLookupError>>;

#[derive(Clone, Copy)]
pub enum CheckRun {
    Sync(SyncCheck),
    Lookup(LookupCheck),
}

/// Optional input a check cannot run without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    None,
    Baseline,
    PackageIndex,
    AliasResolver,
}

impl Requirement {
    pub fn is_met(&self, opts: &ValidateOptions) -> bool {
        match self {
            Requirement::None => true,
            Requirement::Baseline => opts.baseline.is_some(),
            Requirement::PackageIndex => opts.package_index.is_some(),
            Requirement::AliasResolver => opts.alias_resolver.is_some(),
        }
    }

    pub fn skip_reason(&self) -> &'static str {
        match self {
            Requirement::None => "",
            Requirement::Baseline => "no comparison basis provided",
            Requirement::PackageIndex => "no package index provided",
            Requirement::AliasResolver => "no alias resolver provided",
        }
    }
}

pub struct CheckSpec {
    pub name: &'static str,
    /// Label of the check's subtree in the report
    pub label: &'static str,
    pub requires: Requirement,
    pub run: CheckRun,
}

/// Every validation pass, in report order
pub static CHECKS: &[CheckSpec] = &[
    CheckSpec {
        name: "basic",
        label: checks::LABEL_BASIC,
        requires: Requirement::None,
        run: CheckRun::Sync(checks::check_basic),
    },
    CheckSpec {
        name: "naming",
        label: checks::LABEL_NAMING,
        requires: Requirement::None,
        run: CheckRun::Sync(checks::check_naming),
    },
    CheckSpec {
        name: "uniqueness",
        label: checks::LABEL_UNIQUENESS,
        requires: Requirement::None,
        run: CheckRun::Sync(checks::check_uniqueness),
    },
    CheckSpec {
        name: "diff_policy",
        label: checks::LABEL_DIFF,
        requires: Requirement::Baseline,
        run: CheckRun::Sync(checks::check_diff_policy),
    },
    CheckSpec {
        name: "fixed_versions",
        label: checks::LABEL_FIXED_VERSIONS,
        requires: Requirement::PackageIndex,
        run: CheckRun::Sync(checks::check_fixed_versions),
    },
    CheckSpec {
        name: "alias_completeness",
        label: checks::LABEL_ALIASES,
        requires: Requirement::AliasResolver,
        run: CheckRun::Lookup(alias::alias_completeness_pass),
    },
];

/// Run every applicable check to completion.
pub async fn validate(opts: ValidateOptions) -> ValidationReport {
    validate_with_cancel(opts, std::future::pending()).await
}

/// Run every applicable check, aborting outstanding lookups once `cancel`
/// resolves.
///
/// Results of passes that already finished are kept; an interrupted lookup
/// pass is listed in [`ValidationReport::aborted`].
pub async fn validate_with_cancel<F>(opts: ValidateOptions, cancel: F) -> ValidationReport
where
    F: Future<Output = ()>,
{
    let run_id = opts.run.run_id.clone();
    let start = Instant::now();
    log_op_start!(
        "validate",
        run_id = %run_id,
        origin = opts.run.origin.as_deref().unwrap_or("-"),
        document_count = opts.current.len(),
        baseline = opts.baseline.is_some()
    );

    let mut skipped = Vec::new();
    let mut sync_checks = Vec::new();
    let mut lookup_checks = Vec::new();
    for (idx, spec) in CHECKS.iter().enumerate() {
        if !spec.requires.is_met(&opts) {
            let reason = spec.requires.skip_reason();
            log_check_skipped!(spec.name, reason);
            skipped.push(SkippedPass {
                check: spec.name,
                reason,
            });
            continue;
        }
        match spec.run {
            CheckRun::Sync(run) => sync_checks.push((idx, spec, run)),
            CheckRun::Lookup(run) => lookup_checks.push((idx, spec, run)),
        }
    }

    let mut subtrees = run_sync_checks(&opts, &sync_checks);

    let mut aborted = Vec::new();
    let cache = opts.alias_resolver.clone().map(AliasCache::new);
    let mut cancelled = false;
    tokio::pin!(cancel);

    for (idx, spec, run) in lookup_checks {
        let Some(cache) = cache.as_ref() else {
            continue;
        };
        let started = Instant::now();
        log_op_start!(spec.name, resolver = cache.resolver_name());

        let outcome = if cancelled {
            Err(AbortReason::Cancelled)
        } else {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    cancelled = true;
                    Err(AbortReason::Cancelled)
                }
                res = tokio::time::timeout(opts.alias_timeout, run(&opts, cache)) => match res {
                    Ok(Ok(children)) => Ok(children),
                    Ok(Err(err)) => Err(AbortReason::ExternalLookup(err)),
                    Err(_) => Err(AbortReason::ExternalLookup(AliasLookupError::Timeout(
                        opts.alias_timeout,
                    ))),
                },
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(children) => {
                let tree = ErrorTree::node(spec.label, children);
                log_op_end!(
                    spec.name,
                    duration_ms = duration_ms,
                    error_count = tree.error_count(),
                    remote_calls = cache.remote_calls()
                );
                subtrees.push((idx, tree));
            }
            Err(reason) => {
                log_op_error!(spec.name, reason.clone(), duration_ms = duration_ms);
                aborted.push(AbortedPass {
                    check: spec.name,
                    label: spec.label,
                    reason,
                });
            }
        }
    }

    subtrees.sort_by_key(|(idx, _)| *idx);
    let tree = ErrorTree::node("", subtrees.into_iter().map(|(_, t)| t).collect());

    log_op_end!(
        "validate",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = %run_id,
        error_count = tree.error_count(),
        aborted = aborted.len(),
        skipped = skipped.len()
    );

    ValidationReport {
        run_id,
        tree,
        aborted,
        skipped,
    }
}

fn run_sync_checks(
    opts: &ValidateOptions,
    checks: &[(usize, &'static CheckSpec, SyncCheck)],
) -> Vec<(usize, ErrorTree)> {
    thread::scope(|s| {
        let handles: Vec<_> = checks
            .iter()
            .map(|&(idx, spec, run)| {
                (
                    idx,
                    s.spawn(move || {
                        let started = Instant::now();
                        log_op_start!(spec.name);
                        let tree = ErrorTree::node(spec.label, run(opts));
                        log_op_end!(
                            spec.name,
                            duration_ms = started.elapsed().as_millis() as u64,
                            error_count = tree.error_count()
                        );
                        tree
                    }),
                )
            })
            .collect();

        handles
            .into_iter()
            .map(|(idx, handle)| {
                let tree = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (idx, tree)
            })
            .collect()
    })
}
