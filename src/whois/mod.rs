//! WHOIS lookups through the system `whois` resolver.
//!
//! The pipeline for one query is: shape the input (`query`), run the resolver
//! (`executor`), parse its output (`parse`) and, for domain names, infer
//! registration status (`status`). `bulk` runs many domain lookups at once.
//!
//! Every failure ends up as data in the `error` field of a `QueryResult`;
//! none of the lookup methods return `Err`.

mod bulk;
mod executor;
mod parse;
mod query;
mod status;
mod types;

use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::error_handling::{LookupStats, WhoisError};

pub use bulk::BulkOrchestrator;
pub use executor::WhoisExecutor;
pub use parse::parse_fields;
pub use query::{clean_domain, normalize_ip, normalize_tld, AsnInput};
pub use status::RegistrationHeuristic;
pub use types::{
    Analysis, BulkResult, BulkSummary, FieldValue, ParsedFields, QueryOutcome, QueryResult,
};

/// Entry point for all lookup kinds.
///
/// Cheap to clone; clones share the resolver settings and statistics.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    executor: Arc<WhoisExecutor>,
    heuristic: Arc<RegistrationHeuristic>,
    bulk: BulkOrchestrator,
    stats: Arc<LookupStats>,
}

impl WhoisClient {
    /// Builds a client from configuration, reporting into `stats`.
    pub fn new(config: &Config, stats: Arc<LookupStats>) -> Self {
        Self {
            executor: Arc::new(WhoisExecutor::from_config(config)),
            heuristic: Arc::new(RegistrationHeuristic::new(
                crate::config::AVAILABILITY_PHRASES_VERSION,
                config.availability_phrases.as_slice(),
            )),
            bulk: BulkOrchestrator::new(
                config.max_concurrency,
                config.grace_delay,
                Arc::clone(&stats),
            ),
            stats,
        }
    }

    pub fn stats(&self) -> &Arc<LookupStats> {
        &self.stats
    }

    /// Runs an already-shaped query and parses the output.
    ///
    /// No registration status is attached.
    pub async fn query(&self, query: &str) -> QueryResult {
        if query.is_empty() {
            let err = WhoisError::InvalidQuery("query is empty".into());
            self.stats.record_error(&err);
            return QueryResult::failed(query, &err);
        }

        self.stats.record_query();
        match self.executor.execute(query).await {
            Ok(raw_output) => {
                self.stats.record_success();
                let fields = parse_fields(&raw_output);
                log::debug!("{} fields parsed for {}", fields.len(), query);
                QueryResult::answered(query, raw_output, fields)
            }
            Err(err) => {
                self.stats.record_error(&err);
                QueryResult::failed(query, &err)
            }
        }
    }

    /// Looks up a domain name and infers whether it is registered.
    pub async fn lookup_domain(&self, domain: &str) -> QueryResult {
        let domain = clean_domain(domain);
        info!("Looking up WHOIS for domain: {}", domain);

        let result = self.query(&domain).await;
        let analysis = match (result.raw_output(), result.parsed_fields()) {
            (Some(raw), Some(fields)) => Some(self.heuristic.analyze(raw, fields)),
            _ => None,
        };
        match analysis {
            Some(analysis) => result.with_analysis(analysis),
            None => result,
        }
    }

    /// Looks up many domains concurrently. See [`BulkOrchestrator::run`].
    pub async fn lookup_domains(&self, domains: &[String]) -> BulkResult {
        let client = self.clone();
        self.bulk
            .run(domains, move |domain| {
                let client = client.clone();
                async move { Ok(client.lookup_domain(&domain).await) }
            })
            .await
    }

    /// Looks up a TLD registry record (`com` is queried as `.com`).
    pub async fn lookup_tld(&self, tld: &str) -> QueryResult {
        let tld = normalize_tld(tld);
        info!("Looking up WHOIS for TLD: {}", tld);
        if tld == "." {
            let err = WhoisError::InvalidQuery("TLD is empty".into());
            self.stats.record_error(&err);
            return QueryResult::failed(tld, &err);
        }
        self.query(&tld).await
    }

    /// Looks up an IPv4 or IPv6 address.
    pub async fn lookup_ip(&self, ip_address: &str) -> QueryResult {
        let ip_address = normalize_ip(ip_address);
        info!("Looking up WHOIS for IP: {}", ip_address);
        self.query(&ip_address).await
    }

    /// Looks up an autonomous system number.
    pub async fn lookup_asn(&self, asn: &AsnInput) -> QueryResult {
        let asn = asn.canonical();
        info!("Looking up WHOIS for ASN: {}", asn);
        self.query(&asn).await
    }
}
