use anyhow::{anyhow, Result};
use url::Url;

/// Decides which URLs belong to the corpus being crawled.
///
/// A URL is internal when its scheme, host and port match the allowed origin.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    origin: Url,
}

impl UrlPolicy {
    pub fn new(origin: &str) -> Result<Self> {
        let origin = normalize_url(origin).ok_or_else(|| anyhow!("invalid origin {origin:?}"))?;
        Ok(Self { origin })
    }

    /// Policy whose origin is that of `seed`.
    pub fn for_seed(seed: &Url) -> Self {
        Self { origin: seed.clone() }
    }

    pub fn is_internal(&self, url: &Url) -> bool {
        url.scheme() == self.origin.scheme()
            && url.host_str() == self.origin.host_str()
            && url.port_or_known_default() == self.origin.port_or_known_default()
    }
}

/// Canonical form used for deduplication: an http(s) URL with a host and
/// without fragment. Parsing already lowercases the host and resolves dot
/// segments.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    normalize_parsed(url)
}

pub fn normalize_parsed(mut url: Url) -> Option<Url> {
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
