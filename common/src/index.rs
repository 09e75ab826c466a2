//! Inverted index: normalized word -> (DocId -> occurrence count).
//!
//! The on-disk form is one line per word: `<word>( <docID> <count>)+`.

use crate::word::{normalize_word, MIN_WORD_LEN};
use crate::DocId;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index i/o: {0}")]
    Io(#[from] io::Error),
    #[error("malformed index at line {line}: {reason}")]
    Format { line: usize, reason: String },
    #[error("not an indexable word: {0:?}")]
    InvalidWord(String),
    #[error("document ids start at 1")]
    InvalidDocId,
}

/// Sparse DocId -> positive count mapping. Zero counts are never stored.
///
/// Iteration is in ascending DocId order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocCounts {
    counts: BTreeMap<DocId, u32>,
}

impl DocCounts {
    pub fn new() -> Self { Self::default() }

    /// Bump the count for `doc_id`, creating it at 1. Counts saturate at
    /// `u32::MAX`.
    pub fn add(&mut self, doc_id: DocId) {
        let c = self.counts.entry(doc_id).or_insert(0);
        *c = c.saturating_add(1);
    }

    /// Overwrite the count for `doc_id`. Setting zero removes the entry.
    pub fn set(&mut self, doc_id: DocId, count: u32) {
        if count == 0 {
            self.counts.remove(&doc_id);
        } else {
            self.counts.insert(doc_id, count);
        }
    }

    /// Count for `doc_id`, zero when absent.
    pub fn get(&self, doc_id: DocId) -> u32 {
        self.counts.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().map(|(&d, &c)| (d, c))
    }

    /// Per-document minimum; a document survives only if both sides have it.
    pub fn intersect(&self, other: &DocCounts) -> DocCounts {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        let counts = small
            .counts
            .iter()
            .filter_map(|(&d, &c)| large.counts.get(&d).map(|&o| (d, c.min(o))))
            .collect();
        DocCounts { counts }
    }

    /// Per-document sum over both sides.
    pub fn union(&self, other: &DocCounts) -> DocCounts {
        let mut out = self.clone();
        out.union_with(other);
        out
    }

    /// In-place [`DocCounts::union`]. Sums saturate at `u32::MAX`.
    pub fn union_with(&mut self, other: &DocCounts) {
        for (&d, &c) in &other.counts {
            let sum = self.counts.entry(d).or_insert(0);
            *sum = sum.saturating_add(c);
        }
    }
}

impl FromIterator<(DocId, u32)> for DocCounts {
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        let mut out = DocCounts::new();
        for (d, c) in iter {
            out.set(d, c);
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    words: HashMap<String, DocCounts>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    /// Record one occurrence of `word` in `doc_id`.
    ///
    /// `word` must already be normalized and at least three letters long.
    pub fn insert(&mut self, word: &str, doc_id: DocId) -> Result<(), IndexError> {
        check_entry(word, doc_id)?;
        match self.words.get_mut(word) {
            Some(counts) => counts.add(doc_id),
            None => {
                let mut counts = DocCounts::new();
                counts.add(doc_id);
                self.words.insert(word.to_string(), counts);
            }
        }
        Ok(())
    }

    pub fn find(&self, word: &str) -> Option<&DocCounts> {
        self.words.get(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocCounts)> {
        self.words.iter().map(|(w, c)| (w.as_str(), c))
    }

    /// Write the index in its text form. Words are written in sorted order so
    /// repeated saves of the same index produce identical files.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), IndexError> {
        let mut words: Vec<&String> = self.words.keys().collect();
        words.sort();
        for word in words {
            let counts = &self.words[word];
            if counts.is_empty() { continue; }
            write!(out, "{word}")?;
            for (doc_id, count) in counts.iter() {
                write!(out, " {doc_id} {count}")?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), IndexError> {
        let f = File::create(path)?;
        self.write_to(BufWriter::new(f))
    }

    /// Parse the text form. Counts are taken verbatim, not recounted.
    /// An empty input yields an empty index; any structural defect is a
    /// [`IndexError::Format`].
    pub fn read_from<R: BufRead>(input: R) -> Result<Index, IndexError> {
        let mut index = Index::new();
        for (n, line) in input.lines().enumerate() {
            let lineno = n + 1;
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => IndexError::Format { line: lineno, reason: "not valid UTF-8".into() },
                _ => IndexError::Io(e),
            })?;
            let mut fields = line.split_whitespace();
            let word = match fields.next() {
                Some(w) => w,
                None => continue,
            };
            let bad = |reason: String| IndexError::Format { line: lineno, reason };
            if normalize_word(word).as_deref() != Some(word) || word.len() < MIN_WORD_LEN {
                return Err(bad(format!("invalid word {word:?}")));
            }
            if index.words.contains_key(word) {
                return Err(bad(format!("duplicate word {word:?}")));
            }

            let numbers = fields
                .map(|f| f.parse::<u32>().map_err(|_| bad(format!("expected integer, found {f:?}"))))
                .collect::<Result<Vec<u32>, _>>()?;
            if numbers.is_empty() {
                return Err(bad(format!("word {word:?} has no document counts")));
            }
            if numbers.len() % 2 != 0 {
                return Err(bad(format!("word {word:?} has an unpaired document id")));
            }

            let mut counts = DocCounts::new();
            for pair in numbers.chunks_exact(2) {
                let (doc_id, count) = (pair[0], pair[1]);
                if doc_id == 0 {
                    return Err(bad("document id 0".into()));
                }
                if count == 0 {
                    return Err(bad(format!("zero count for document {doc_id}")));
                }
                counts.set(doc_id, count);
            }
            index.words.insert(word.to_string(), counts);
        }
        Ok(index)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Index, IndexError> {
        let f = File::open(path)?;
        Index::read_from(BufReader::new(f))
    }
}

fn check_entry(word: &str, doc_id: DocId) -> Result<(), IndexError> {
    if doc_id == 0 {
        return Err(IndexError::InvalidDocId);
    }
    if word.len() < MIN_WORD_LEN || normalize_word(word).as_deref() != Some(word) {
        return Err(IndexError::InvalidWord(word.to_string()));
    }
    Ok(())
}
