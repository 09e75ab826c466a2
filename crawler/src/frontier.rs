use std::collections::{HashSet, VecDeque};
use tse_common::Document;

/// Documents waiting to be fetched. Extraction is oldest-first, which keeps
/// the crawl roughly breadth-first; nothing depends on that order.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<Document>,
}

impl Frontier {
    pub fn new() -> Self { Self::default() }
    pub fn push(&mut self, doc: Document) { self.pending.push_back(doc); }
    pub fn pop(&mut self) -> Option<Document> { self.pending.pop_front() }
    pub fn len(&self) -> usize { self.pending.len() }
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }
}

/// Normalized URLs discovered during one crawl run. Only grows.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: HashSet<String>,
}

impl SeenSet {
    /// Returns false if the URL was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize { self.urls.len() }
    pub fn is_empty(&self) -> bool { self.urls.is_empty() }
}
