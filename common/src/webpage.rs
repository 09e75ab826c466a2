use crate::word;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

lazy_static! {
    static ref ANCHORS: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// One crawled page. `depth` is fixed when the document is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub depth: u32,
    pub content: String,
}

impl Document {
    /// A document that has been discovered but not fetched yet.
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self { url: url.into(), depth, content: String::new() }
    }

    pub fn with_content(url: impl Into<String>, depth: u32, content: impl Into<String>) -> Self {
        Self { url: url.into(), depth, content: content.into() }
    }

    /// Outbound links in document order, resolved against the page's own URL.
    /// Hrefs that cannot be resolved are dropped here.
    pub fn links(&self) -> Vec<Url> {
        let base = match Url::parse(&self.url) {
            Ok(u) => u,
            Err(_) => return Vec::new(),
        };
        let html = Html::parse_document(&self.content);
        html.select(&ANCHORS)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| base.join(href.trim()).ok())
            .collect()
    }

    /// Visible text of the page with markup stripped.
    pub fn text(&self) -> String {
        let html = Html::parse_document(&self.content);
        html.root_element().text().collect::<Vec<_>>().join(" ")
    }

    /// Words of the page that qualify as index keys, with repeats.
    pub fn indexable_words(&self) -> Vec<String> {
        word::indexable_words(&self.text()).collect()
    }
}
