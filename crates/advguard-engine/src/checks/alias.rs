//! CVE/GHSA alias set completeness
//!
//! The CVE is the canonical advisory ID and its GHSAs belong in the alias
//! list. The pass needs the alias service for every comparison, so the first
//! lookup failure ends the whole pass.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use advguard_core::errors::AliasLookupError;
use advguard_core::model::IdScheme;
use advguard_core::{AliasResolver, ErrorTree, ValidationError};
use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Mutex;

use crate::options::ValidateOptions;

/// Per-run memo in front of an [`AliasResolver`].
///
/// Repeated advisory IDs are resolved once. Failures are not cached.
pub struct AliasCache {
    resolver: Arc<dyn AliasResolver>,
    ghsas: Mutex<HashMap<String, Vec<String>>>,
    cves: Mutex<HashMap<String, Option<String>>>,
    remote_calls: AtomicUsize,
}

impl AliasCache {
    pub fn new(resolver: Arc<dyn AliasResolver>) -> Self {
        Self {
            resolver,
            ghsas: Mutex::new(HashMap::new()),
            cves: Mutex::new(HashMap::new()),
            remote_calls: AtomicUsize::new(0),
        }
    }

    pub async fn ghsas_for_cve(&self, cve: &str) -> Result<Vec<String>, AliasLookupError> {
        let mut memo = self.ghsas.lock().await;
        if let Some(hit) = memo.get(cve) {
            return Ok(hit.clone());
        }
        self.remote_calls.fetch_add(1, Ordering::Relaxed);
        let ghsas = self.resolver.ghsas_for_cve(cve).await?;
        memo.insert(cve.to_string(), ghsas.clone());
        Ok(ghsas)
    }

    pub async fn cve_for_ghsa(&self, ghsa: &str) -> Result<Option<String>, AliasLookupError> {
        let mut memo = self.cves.lock().await;
        if let Some(hit) = memo.get(ghsa) {
            return Ok(hit.clone());
        }
        self.remote_calls.fetch_add(1, Ordering::Relaxed);
        let cve = self.resolver.cve_for_ghsa(ghsa).await?;
        memo.insert(ghsa.to_string(), cve.clone());
        Ok(cve)
    }

    /// Lookups that reached the resolver
    pub fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::Relaxed)
    }

    pub fn resolver_name(&self) -> &str {
        self.resolver.name()
    }
}

pub async fn check_alias_completeness(
    opts: &ValidateOptions,
    cache: &AliasCache,
) -> Result<Vec<ErrorTree>, AliasLookupError> {
    let mut documents = Vec::new();

    for (_, doc) in opts.current.select(&opts.scope) {
        let mut advisories = Vec::new();
        for adv in &doc.advisories {
            let mut errors = Vec::new();
            match IdScheme::of_prefix(&adv.id) {
                Some(IdScheme::Cve) => {
                    for ghsa in cache.ghsas_for_cve(&adv.id).await? {
                        if !adv.has_alias(&ghsa) {
                            errors.push(ErrorTree::bare(ValidationError::AliasMissing {
                                alias: ghsa,
                                aliases: adv.aliases.clone(),
                            }));
                        }
                    }
                }
                Some(IdScheme::Ghsa) => {
                    let cve = cache.cve_for_ghsa(&adv.id).await?;
                    if let Some(cve) = cve.filter(|c| !c.is_empty()) {
                        // Regardless of the alias list: the GHSA must not be primary.
                        errors.push(ErrorTree::bare(ValidationError::AliasPrimaryIdPolicy {
                            ghsa: adv.id.clone(),
                            cve,
                        }));
                    }
                }
                Some(IdScheme::Internal) | None => {}
            }
            advisories.push(ErrorTree::node(&adv.id, errors));
        }
        documents.push(ErrorTree::node(doc.name(), advisories));
    }

    Ok(documents)
}

/// Boxed form stored in the check table
pub fn alias_completeness_pass<'a>(
    opts: &'a ValidateOptions,
    cache: &'a AliasCache,
) -> BoxFuture<'a, Result<Vec<ErrorTree>, AliasLookupError>> {
    check_alias_completeness(opts, cache).boxed()
}
