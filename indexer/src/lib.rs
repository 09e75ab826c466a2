use anyhow::Result;
use tracing::{debug, info, warn};
use tse_common::{DocId, Document, Index, PageStore};

/// Build an index over every page in `store`, walking DocIds up from 1 until
/// the first one with no page.
///
/// A page that exists but cannot be parsed is logged and skipped; its DocId
/// still counts so later pages keep their ids.
pub fn build_index(store: &PageStore) -> Result<Index> {
    let mut index = Index::new();
    let mut doc_id: DocId = 1;
    let mut indexed = 0u32;
    loop {
        match store.load(doc_id) {
            Ok(Some(doc)) => {
                index_page(&mut index, doc_id, &doc)?;
                indexed += 1;
            }
            Ok(None) => break,
            Err(e) => warn!(doc_id, error = %e, "skipping unreadable page"),
        }
        doc_id += 1;
    }
    info!(num_docs = indexed, num_words = index.len(), "ingested documents");
    Ok(index)
}

/// Add one occurrence per indexable word of `doc`.
pub fn index_page(index: &mut Index, doc_id: DocId, doc: &Document) -> Result<()> {
    let words = doc.indexable_words();
    debug!(doc_id, url = %doc.url, words = words.len(), "indexing page");
    for word in &words {
        index.insert(word, doc_id)?;
    }
    Ok(())
}
