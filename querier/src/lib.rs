pub mod query;

use std::io::{self, BufRead, Write};
use tracing::{debug, warn};
use tse_common::{DocCounts, DocId, Index, PageStore};

pub use query::{Query, QueryError, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub score: u32,
    pub doc_id: DocId,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub query: Query,
    pub hits: Vec<Hit>,
}

/// Order scored documents by descending score; equal scores go to the lower
/// DocId first.
pub fn rank(scores: &DocCounts) -> Vec<(DocId, u32)> {
    let mut ranked: Vec<(DocId, u32)> = scores.iter().filter(|&(_, s)| s > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Answers queries against a loaded index, looking URLs up in the page
/// directory the index was built from. The index is never modified.
pub struct Querier {
    index: Index,
    pages: PageStore,
}

impl Querier {
    pub fn new(index: Index, pages: PageStore) -> Self {
        Self { index, pages }
    }

    pub fn index(&self) -> &Index { &self.index }

    pub fn answer(&self, line: &str) -> Result<Answer, QueryError> {
        let query = Query::parse(line)?;
        let scores = query.evaluate(&self.index);
        debug!(%query, matches = scores.len(), "evaluated");
        let hits = rank(&scores)
            .into_iter()
            .map(|(doc_id, score)| Hit { score, doc_id, url: self.lookup_url(doc_id) })
            .collect();
        Ok(Answer { query, hits })
    }

    fn lookup_url(&self, doc_id: DocId) -> Option<String> {
        match self.pages.load_url(doc_id) {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                warn!(doc_id, "no page for indexed document");
                None
            }
            Err(e) => {
                warn!(doc_id, error = %e, "unreadable page");
                None
            }
        }
    }

    /// Print the response to one input line. Rejected lines write only to `err`.
    pub fn respond<W: Write, E: Write>(&self, line: &str, out: &mut W, err: &mut E) -> io::Result<()> {
        if line.trim().is_empty() {
            return writeln!(out, "No documents match.");
        }
        let answer = match self.answer(line) {
            Ok(a) => a,
            Err(e) => return writeln!(err, "Error: {e}"),
        };
        writeln!(out, "Query: {}", answer.query)?;
        if answer.hits.is_empty() {
            return writeln!(out, "No documents match.");
        }
        for hit in &answer.hits {
            if let Some(url) = &hit.url {
                writeln!(out, "score {:4} doc {:3}: {}", hit.score, hit.doc_id, url)?;
            }
        }
        Ok(())
    }

    /// Read query lines until end of input, answering each in turn.
    pub fn run<R: BufRead, W: Write, E: Write>(&self, mut input: R, out: &mut W, err: &mut E, prompt: bool) -> io::Result<()> {
        let mut line = String::new();
        loop {
            if prompt {
                write!(out, "Query? ")?;
                out.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            self.respond(line.trim_end_matches(['\n', '\r']), out, err)?;
            out.flush()?;
        }
        Ok(())
    }
}
