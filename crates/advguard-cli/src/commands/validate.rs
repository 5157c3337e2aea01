//! Validate command
//!
//! Usage: advguard validate [--dir D] [--base-dir D] [--build-configs D]
//!        [--package-index F] [--aliases F] [--package P]... [--now T]
//!        [--origin TAG] [--diff-summary] [--output text|json]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use advguard_core::logging_facility::{init, Profile};
use advguard_core::diff::{compute_diff, render_human_summary};
use advguard_core::PackageScope;
use advguard_core_types::RunContext;
use advguard_engine::{validate_with_cancel, ValidateOptions, ValidationReport};
use advguard_store::{
    load_build_configs, load_package_index, load_snapshot, StaticAliasResolver,
};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::{Args, ValueEnum};

use crate::config::ValidateConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file (defaults to ./advguard.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of advisory documents to validate
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Baseline advisory directory to diff against
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Directory of package build configurations
    #[arg(long)]
    pub build_configs: Option<PathBuf>,

    /// APKINDEX file of published packages
    #[arg(long)]
    pub package_index: Option<PathBuf>,

    /// JSON alias table mapping CVEs to GHSAs
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// Restrict validation to these packages (repeatable)
    #[arg(long = "package")]
    pub packages: Vec<String>,

    /// Reference time for the recency rule (RFC 3339)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Emit JSON logs on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Tag recorded with the run in logs (e.g. a pull request number)
    #[arg(long)]
    pub origin: Option<String>,

    /// Print a Markdown summary of the diff against the baseline first
    #[arg(long)]
    pub diff_summary: bool,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp {:?}: {}", s, e))
}

fn pick(flag: Option<PathBuf>, file: Option<PathBuf>) -> Option<PathBuf> {
    flag.or(file)
}

fn context_for(what: &str, path: &Path) -> String {
    format!("failed to load {} from {}", what, path.display())
}

/// Build run options from flags layered over the configuration file
fn build_options(args: &ValidateArgs, config: ValidateConfig) -> anyhow::Result<ValidateOptions> {
    let dir = pick(args.dir.clone(), config.advisories_dir).unwrap_or_else(|| PathBuf::from("."));
    let current = load_snapshot(&dir).with_context(|| context_for("advisories", &dir))?;

    let run = match &args.origin {
        Some(origin) => RunContext::new().with_origin(origin.clone()),
        None => RunContext::new(),
    };
    let mut opts = ValidateOptions::new(current)
        .with_run_context(run)
        .with_now(args.now.unwrap_or_else(Utc::now))
        .with_recency_window(Duration::days(config.recency_window_days))
        .with_alias_timeout(StdDuration::from_secs(config.alias_timeout_secs));

    let packages = if args.packages.is_empty() {
        config.packages
    } else {
        args.packages.clone()
    };
    opts = opts.with_scope(PackageScope::only(packages));

    if let Some(path) = pick(args.base_dir.clone(), config.base_advisories_dir) {
        let baseline =
            load_snapshot(&path).with_context(|| context_for("baseline advisories", &path))?;
        opts = opts.with_baseline(baseline);
    }
    if let Some(path) = pick(args.build_configs.clone(), config.build_configs_dir) {
        let build_configs =
            load_build_configs(&path).with_context(|| context_for("build configurations", &path))?;
        opts = opts.with_build_configs(build_configs);
    }
    if let Some(path) = pick(args.package_index.clone(), config.package_index) {
        let index =
            load_package_index(&path).with_context(|| context_for("package index", &path))?;
        opts = opts.with_package_index(index);
    }
    if let Some(path) = pick(args.aliases.clone(), config.alias_table) {
        let resolver =
            StaticAliasResolver::from_json(&path).with_context(|| context_for("alias table", &path))?;
        opts = opts.with_alias_resolver(Arc::new(resolver));
    }

    Ok(opts)
}

fn print_report(report: &ValidationReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.to_value())?);
        }
        OutputFormat::Text => {
            for skipped in &report.skipped {
                eprintln!("skipped {}: {}", skipped.check, skipped.reason);
            }
            if report.passed() {
                println!("✓ Validation passed");
            } else {
                print!("{}", report);
            }
        }
    }
    Ok(())
}

/// Execute validate; `Ok(false)` means the documents failed validation
pub async fn execute(args: ValidateArgs) -> anyhow::Result<bool> {
    let config = ValidateConfig::load(args.config.as_deref())?;
    init(if args.json_logs {
        Profile::Production
    } else {
        config.log_profile
    });

    let opts = build_options(&args, config)?;
    tracing::debug!(options = ?opts, "validation options resolved");

    if args.diff_summary {
        match &opts.baseline {
            Some(baseline) => print!("{}", render_human_summary(&compute_diff(baseline, &opts.current))),
            None => eprintln!("--diff-summary needs a baseline (--base-dir)"),
        }
    }

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let report = validate_with_cancel(opts, cancel).await;

    print_report(&report, args.output)?;
    Ok(report.passed())
}
