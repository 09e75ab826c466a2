use anyhow::{anyhow, Result};
use reqwest::{header, Client};
use std::future::Future;
use std::time::Duration;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Retrieves the raw content behind a URL. An error means the page is
/// unavailable for this run; callers never retry.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("HTTP {}", resp.status()));
        }
        if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
            if let Ok(v) = ct.to_str() {
                if !v.starts_with("text/html") {
                    return Err(anyhow!("not html: {v}"));
                }
            }
        }
        let bytes = resp.bytes().await?;
        if bytes.len() > MAX_BODY_BYTES {
            return Err(anyhow!("body too large: {} bytes", bytes.len()));
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
