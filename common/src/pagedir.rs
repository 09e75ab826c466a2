use crate::webpage::Document;
use crate::DocId;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;

const MARKER: &str = ".crawler";
const MARKER_VERSION: u32 = 1;

/// Contents of the `.crawler` marker that identifies a corpus directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlMeta {
    pub seed_url: String,
    pub max_depth: u32,
    pub created_at: String,
    pub version: u32,
}

impl CrawlMeta {
    pub fn new(seed_url: impl Into<String>, max_depth: u32) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth,
            created_at: time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
            version: MARKER_VERSION,
        }
    }
}

/// Directory of crawled pages, one file per DocId.
///
/// Each page file holds the URL on the first line, the depth on the second,
/// and the raw content after that.
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn marker(&self) -> PathBuf { self.root.join(MARKER) }
    fn page(&self, doc_id: DocId) -> PathBuf { self.root.join(doc_id.to_string()) }

    /// Create the directory if needed and mark it as a corpus.
    pub fn init(&self, meta: &CrawlMeta) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))?;
        let mut f = File::create(self.marker())
            .with_context(|| format!("writing marker in {}", self.root.display()))?;
        let json = serde_json::to_string_pretty(meta)?;
        f.write_all(json.as_bytes())?;
        tracing::debug!(root = %self.root.display(), seed = %meta.seed_url, "initialized page directory");
        Ok(())
    }

    /// True when the directory carries the corpus marker.
    pub fn validate(&self) -> bool {
        self.marker().is_file()
    }

    pub fn read_meta(&self) -> Result<CrawlMeta> {
        let text = fs::read_to_string(self.marker())
            .with_context(|| format!("reading marker in {}", self.root.display()))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, doc: &Document, doc_id: DocId) -> Result<()> {
        if doc_id == 0 {
            return Err(anyhow!("document ids start at 1"));
        }
        let path = self.page(doc_id);
        let mut f = File::create(&path).with_context(|| format!("writing {}", path.display()))?;
        writeln!(f, "{}", doc.url)?;
        writeln!(f, "{}", doc.depth)?;
        f.write_all(doc.content.as_bytes())?;
        Ok(())
    }

    /// Read back a saved page. `Ok(None)` means no page exists under `doc_id`,
    /// which is how enumeration finds the end of the corpus.
    pub fn load(&self, doc_id: DocId) -> Result<Option<Document>> {
        let mut reader = match self.open(doc_id)? {
            Some(r) => r,
            None => return Ok(None),
        };
        let url = read_header_line(&mut reader, doc_id, "url")?;
        let depth_line = read_header_line(&mut reader, doc_id, "depth")?;
        let depth = depth_line
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("page {doc_id}: bad depth {depth_line:?}"))?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Some(Document::with_content(url, depth, content)))
    }

    /// Read only the URL line of a saved page.
    pub fn load_url(&self, doc_id: DocId) -> Result<Option<String>> {
        match self.open(doc_id)? {
            Some(mut r) => Ok(Some(read_header_line(&mut r, doc_id, "url")?)),
            None => Ok(None),
        }
    }

    fn open(&self, doc_id: DocId) -> Result<Option<BufReader<File>>> {
        if doc_id == 0 {
            return Ok(None);
        }
        let path = self.page(doc_id);
        match File::open(&path) {
            Ok(f) => Ok(Some(BufReader::new(f))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("opening {}", path.display())),
        }
    }
}

fn read_header_line<R: BufRead>(reader: &mut R, doc_id: DocId, what: &str) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(anyhow!("page {doc_id}: missing {what} line"));
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return Err(anyhow!("page {doc_id}: empty {what} line"));
    }
    Ok(trimmed.to_string())
}
