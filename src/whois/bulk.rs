//! Concurrent bulk domain lookups.
//!
//! Every domain gets its own task up front. Tasks share one admission
//! semaphore, so at most `max_concurrency` resolvers run at once, and each
//! task keeps its permit through a short grace delay after finishing to
//! throttle the aggregate request rate.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use log::{error, info, warn};
use tokio::task::JoinError;

use crate::error_handling::{ErrorType, LookupFailure, LookupStats};
use crate::initialization::init_semaphore;

use super::query::clean_domain;
use super::types::{BulkResult, BulkSummary, QueryResult};

/// Fans domain lookups out under a concurrency cap and aggregates them.
#[derive(Debug, Clone)]
pub struct BulkOrchestrator {
    max_concurrency: usize,
    grace_delay: Duration,
    stats: Arc<LookupStats>,
}

impl BulkOrchestrator {
    pub fn new(max_concurrency: usize, grace_delay: Duration, stats: Arc<LookupStats>) -> Self {
        Self {
            max_concurrency,
            grace_delay,
            stats,
        }
    }

    /// Runs `lookup` for every domain and summarizes the outcomes.
    ///
    /// `lookup` receives the domain exactly as given and must perform the
    /// whole single-domain pipeline. A task that returns `Err` or panics is
    /// counted as an error and left out of `results`; it never affects its
    /// siblings. Results are keyed by the cleaned domain name.
    pub async fn run<F, Fut>(&self, domains: &[String], lookup: F) -> BulkResult
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<QueryResult, LookupFailure>> + Send + 'static,
    {
        info!("Looking up WHOIS for {} domains", domains.len());

        let semaphore = init_semaphore(self.max_concurrency);
        let grace_delay = self.grace_delay;

        let handles: Vec<_> = domains
            .iter()
            .map(|domain| {
                let semaphore = Arc::clone(&semaphore);
                let task = lookup(domain.clone());
                let domain_for_err = domain.clone();
                let handle = tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| LookupFailure {
                        domain: domain_for_err,
                        reason: format!("admission gate closed: {}", e),
                    })?;
                    let result = task.await;
                    tokio::time::sleep(grace_delay).await;
                    result
                });
                (domain.clone(), handle)
            })
            .collect();

        let settled = join_all(
            handles
                .into_iter()
                .map(|(domain, handle)| async move { (domain, handle.await) }),
        )
        .await;

        let mut results = BTreeMap::new();
        let mut registered = 0usize;
        let mut errors = 0usize;

        for (domain, joined) in settled {
            match flatten_join(&domain, joined) {
                Ok(result) => {
                    if result.is_error() {
                        errors += 1;
                    } else if result.is_registered == Some(true) {
                        registered += 1;
                    }
                    results.insert(clean_domain(&domain), result);
                }
                Err(failure) => {
                    error!("{}", failure);
                    self.stats.increment_error(ErrorType::TaskFailure);
                    errors += 1;
                }
            }
        }

        let total = domains.len();
        let summary = BulkSummary {
            total_domains: total,
            registered_domains: registered,
            available_domains: total.saturating_sub(registered + errors),
            errors,
            timestamp: Utc::now(),
        };

        info!(
            "Bulk WHOIS done: {} total, {} registered, {} available, {} errors",
            summary.total_domains,
            summary.registered_domains,
            summary.available_domains,
            summary.errors
        );

        BulkResult { results, summary }
    }
}

fn flatten_join(
    domain: &str,
    joined: Result<Result<QueryResult, LookupFailure>, JoinError>,
) -> Result<QueryResult, LookupFailure> {
    match joined {
        Ok(outcome) => outcome,
        Err(join_error) => {
            let reason = if join_error.is_panic() {
                warn!("Lookup task for {} panicked", domain);
                "task panicked".to_string()
            } else {
                "task was cancelled".to_string()
            };
            Err(LookupFailure {
                domain: domain.to_string(),
                reason,
            })
        }
    }
}
