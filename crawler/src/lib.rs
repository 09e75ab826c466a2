//! Depth-bounded crawl of one site into a [`PageStore`].

pub mod fetch;
pub mod frontier;
pub mod policy;

use anyhow::{ensure, Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use tse_common::{DocId, Document, PageStore};

pub use fetch::{Fetcher, HttpFetcher};
pub use frontier::{Frontier, SeenSet};
pub use policy::{normalize_url, UrlPolicy};

pub const MAX_DEPTH: u32 = 10;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub max_depth: u32,
    /// Fetches allowed in flight at once; 1 gives a strictly serial crawl.
    pub concurrency: usize,
    /// Pause before each fetch.
    pub delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self { max_depth: 0, concurrency: 1, delay: Duration::ZERO }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages written to the store; also the highest DocId assigned.
    pub saved: u32,
    /// Fetches that failed, plus pages that could not be written.
    pub failed: u32,
    /// Distinct internal URLs discovered, seed included.
    pub discovered: usize,
}

pub struct Crawler<F: Fetcher> {
    config: CrawlConfig,
    policy: UrlPolicy,
    store: PageStore,
    fetcher: Arc<F>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(config: CrawlConfig, policy: UrlPolicy, store: PageStore, fetcher: F) -> Result<Self> {
        ensure!(config.max_depth <= MAX_DEPTH, "max depth must be between 0 and {MAX_DEPTH}");
        Ok(Self { config, policy, store, fetcher: Arc::new(fetcher) })
    }

    /// Crawl outward from `seed`, saving every fetched page under the next
    /// DocId in fetch-completion order.
    ///
    /// Seen-set updates, depth checks, and DocId allocation all happen here on
    /// the calling task; spawned tasks only fetch.
    pub async fn crawl(&self, seed: &str) -> Result<CrawlStats> {
        let seed = normalize_url(seed).with_context(|| format!("cannot normalize seed URL {seed:?}"))?;
        ensure!(self.policy.is_internal(&seed), "seed URL {seed} is not internal");

        let mut frontier = Frontier::new();
        let mut seen = SeenSet::default();
        seen.insert(seed.as_str());
        frontier.push(Document::new(seed.as_str(), 0));

        let mut next_id: DocId = 1;
        let mut stats = CrawlStats::default();
        let mut inflight: JoinSet<(Document, Result<String>)> = JoinSet::new();
        let workers = self.config.concurrency.max(1);

        loop {
            while inflight.len() < workers {
                let Some(doc) = frontier.pop() else { break };
                let fetcher = Arc::clone(&self.fetcher);
                let delay = self.config.delay;
                inflight.spawn(async move {
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                    let fetched = fetcher.fetch(&doc.url).await;
                    (doc, fetched)
                });
            }

            let Some(joined) = inflight.join_next().await else { break };
            let (mut doc, fetched) = joined.context("fetch task panicked")?;
            match fetched {
                Ok(content) => doc.content = content,
                Err(e) => {
                    warn!(url = %doc.url, error = %e, "fetch failed");
                    stats.failed += 1;
                    continue;
                }
            }

            if let Err(e) = self.store.save(&doc, next_id) {
                warn!(url = %doc.url, error = %e, "could not save page");
                stats.failed += 1;
                continue;
            }
            debug!(doc_id = next_id, depth = doc.depth, url = %doc.url, "saved");
            next_id += 1;
            stats.saved += 1;
            if stats.saved % 100 == 0 {
                info!(saved = stats.saved, discovered = seen.len(), frontier = frontier.len(), "progress");
            }

            if doc.depth < self.config.max_depth {
                self.scan(&doc, &mut frontier, &mut seen);
            }
        }

        stats.discovered = seen.len();
        info!(saved = stats.saved, failed = stats.failed, discovered = stats.discovered, "crawl complete");
        Ok(stats)
    }

    /// Queue every internal link of `doc` that has not been seen yet.
    fn scan(&self, doc: &Document, frontier: &mut Frontier, seen: &mut SeenSet) {
        for link in doc.links() {
            let Some(url) = policy::normalize_parsed(link) else { continue };
            if !self.policy.is_internal(&url) {
                continue;
            }
            if seen.insert(url.as_str()) {
                frontier.push(Document::new(url.as_str(), doc.depth + 1));
            }
        }
    }
}
