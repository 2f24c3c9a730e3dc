//! Bounded-concurrency liveness probing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use marklens_core::{InputItem, Record};
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::normalize::{NormalizedUrl, host_of, normalize};

/// Statuses that mark a link as gone for good.
///
/// Deliberately narrow: 5xx, timeouts, and connection errors are transient
/// and never count as expiry.
const EXPIRED_STATUSES: &[u16] = &[404, 410];

/// Redirect statuses whose `Location` header is followed.
const REDIRECT_STATUSES: &[u16] = &[301, 302, 303, 307, 308];

#[derive(Debug, Clone, Copy)]
pub struct CheckerConfig {
    /// Maximum in-flight probes per request.
    pub max_concurrency: usize,
    /// Per-probe timeout.
    pub timeout: Duration,
    /// Redirect hops followed before reporting the redirect status as final.
    pub max_redirects: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 24,
            timeout: Duration::from_secs(3),
            max_redirects: 3,
        }
    }
}

/// Verdict for one distinct normalised URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub status_code: Option<u16>,
    pub expired: bool,
}

impl Verdict {
    /// No network signal: skipped scheme, cached domain failure, or error.
    const UNCHECKED: Self = Self {
        status_code: None,
        expired: false,
    };

    fn from_status(status: u16) -> Self {
        Self {
            status_code: Some(status),
            expired: EXPIRED_STATUSES.contains(&status),
        }
    }
}

/// Raw response of a single non-following HEAD request.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub location: Option<String>,
}

#[derive(Debug, Error)]
#[error("probe failed: {0}")]
pub struct ProbeError(pub String);

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// One HEAD request, without redirect following.
///
/// Seam for tests; the real implementation is [`HttpProbe`].
#[async_trait]
pub trait UrlProbe: Send + Sync {
    async fn head(&self, url: &str) -> Result<ProbeResponse, ProbeError>;
}

/// Probe backed by a shared `reqwest` client.
///
/// Redirects are disabled on the client: the checker follows them manually
/// so it can cap the hop count and treat a missing `Location` as final.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("marklens/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn head(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        let response = self.client.head(url).send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(ProbeResponse { status, location })
    }
}

/// Batch link checker: dedup, bounded fan-out, order-preserving reassembly.
pub struct LinkChecker {
    probe: Arc<dyn UrlProbe>,
    config: CheckerConfig,
}

impl LinkChecker {
    /// Checker over the real HTTP probe.
    pub fn new(config: CheckerConfig) -> Result<Self, CheckError> {
        let probe = HttpProbe::new(config.timeout)?;
        Ok(Self {
            probe: Arc::new(probe),
            config,
        })
    }

    /// Checker over a custom probe (tests).
    pub fn with_probe(probe: Arc<dyn UrlProbe>, config: CheckerConfig) -> Self {
        Self { probe, config }
    }

    /// Check a batch, returning one result row per input row in input order.
    ///
    /// Each distinct normalised URL is probed exactly once; duplicate rows
    /// share the verdict but keep their own raw `url` and passthrough
    /// `title`/`folder_name`. A probe failure is terminal for its URL and
    /// marks the whole host as unreachable for the rest of this invocation.
    pub async fn check_batch(&self, items: &[InputItem]) -> Vec<Record> {
        let keys: Vec<NormalizedUrl> = items.iter().map(|item| normalize(item.raw_url())).collect();

        let mut seen = HashSet::new();
        let distinct: Vec<NormalizedUrl> = keys
            .iter()
            .filter(|key| seen.insert((*key).clone()))
            .cloned()
            .collect();
        debug!(
            rows = items.len(),
            distinct = distinct.len(),
            "checking link batch"
        );

        let failed_domains = Arc::new(Mutex::new(HashSet::new()));
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));

        let tasks = distinct.into_iter().map(|key| {
            let probe = Arc::clone(&self.probe);
            let failed_domains = Arc::clone(&failed_domains);
            let semaphore = Arc::clone(&semaphore);
            let max_redirects = self.config.max_redirects;
            async move {
                let verdict = match &key {
                    NormalizedUrl::Skipped(_) => Verdict::UNCHECKED,
                    NormalizedUrl::Web(url) => {
                        check_one(probe.as_ref(), url, max_redirects, &failed_domains, &semaphore)
                            .await
                    }
                };
                (key, verdict)
            }
        });
        let verdicts: HashMap<NormalizedUrl, Verdict> = join_all(tasks).await.into_iter().collect();

        items
            .iter()
            .zip(&keys)
            .map(|(item, key)| {
                let verdict = verdicts.get(key).copied().unwrap_or(Verdict::UNCHECKED);
                result_row(item, verdict)
            })
            .collect()
    }
}

/// Build one output row: the row's own raw URL and passthrough fields,
/// the shared verdict for its normalised key.
fn result_row(item: &InputItem, verdict: Verdict) -> Record {
    let mut row = Record::new();
    row.annotate("url", item.raw_url());
    row.annotate("expired_link", verdict.expired);
    match verdict.status_code {
        Some(code) => row.annotate("status_code", i64::from(code)),
        None => row.annotate("status_code", Value::Null),
    }
    if let Some(record) = item.as_record() {
        if let Some(title) = record.get("title") {
            row.annotate("title", title.clone());
        }
        if let Some(folder) = record.get("folder_name") {
            row.annotate("folder_name", folder.clone());
        }
    }
    row
}

async fn check_one(
    probe: &dyn UrlProbe,
    url: &str,
    max_redirects: usize,
    failed_domains: &Mutex<HashSet<String>>,
    semaphore: &Semaphore,
) -> Verdict {
    let host = host_of(url);

    if let Some(host) = &host
        && domain_failed(failed_domains, host)
    {
        debug!(url, host = %host, "skipping: domain already unreachable");
        return Verdict::UNCHECKED;
    }

    let _permit = match semaphore.acquire().await {
        Ok(permit) => permit,
        Err(_) => return Verdict::UNCHECKED,
    };

    // The domain may have been marked while this task waited for a permit.
    if let Some(host) = &host
        && domain_failed(failed_domains, host)
    {
        debug!(url, host = %host, "skipping: domain failed while queued");
        return Verdict::UNCHECKED;
    }

    match final_status(probe, url, max_redirects).await {
        Ok(status) => Verdict::from_status(status),
        Err(err) => {
            if let Some(host) = host {
                warn!(url, host = %host, error = %err, "probe failed; caching domain as unreachable");
                lock(failed_domains).insert(host);
            } else {
                warn!(url, error = %err, "probe failed");
            }
            Verdict::UNCHECKED
        }
    }
}

/// HEAD with manual redirect following.
///
/// A redirect without a `Location` header is final, as is whatever status
/// the last allowed hop returns.
async fn final_status(
    probe: &dyn UrlProbe,
    url: &str,
    max_redirects: usize,
) -> Result<u16, ProbeError> {
    let mut current = url.to_string();
    let mut hops = 0;
    loop {
        let response = probe.head(&current).await?;
        if !REDIRECT_STATUSES.contains(&response.status) || hops == max_redirects {
            return Ok(response.status);
        }
        match response.location {
            Some(next) => {
                debug!(from = %current, to = %next, "following redirect");
                current = resolve_location(&current, &next);
                hops += 1;
            }
            None => return Ok(response.status),
        }
    }
}

/// Resolve a possibly-relative `Location` against the current URL.
fn resolve_location(base: &str, location: &str) -> String {
    match url::Url::parse(base).and_then(|b| b.join(location)) {
        Ok(joined) => joined.to_string(),
        Err(_) => location.to_string(),
    }
}

fn domain_failed(failed_domains: &Mutex<HashSet<String>>, host: &str) -> bool {
    lock(failed_domains).contains(host)
}

fn lock(failed_domains: &Mutex<HashSet<String>>) -> std::sync::MutexGuard<'_, HashSet<String>> {
    failed_domains
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
