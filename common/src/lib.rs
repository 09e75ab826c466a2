pub mod exit;
pub mod index;
pub mod pagedir;
pub mod webpage;
pub mod word;

pub use index::{DocCounts, Index, IndexError};
pub use pagedir::{CrawlMeta, PageStore};
pub use webpage::Document;

/// Dense, 1-based identifier shared by the page store and the index.
pub type DocId = u32;
