use querier::{Querier, Query};
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;
use tse_common::{CrawlMeta, Document, Index, PageStore};

fn build_corpus(dir: &Path, pages: &[&str]) -> Querier {
    let store = PageStore::new(dir.join("pages"));
    store.init(&CrawlMeta::new("http://example.com/", 2)).unwrap();
    let mut index = Index::new();
    for (i, content) in pages.iter().enumerate() {
        let doc_id = i as u32 + 1;
        let url = if doc_id == 1 { "http://example.com/".to_string() } else { format!("http://example.com/{doc_id}.html") };
        let doc = Document::with_content(url, 1, *content);
        store.save(&doc, doc_id).unwrap();
        for word in doc.indexable_words() {
            index.insert(&word, doc_id).unwrap();
        }
    }
    // Go through the file so the querier sees what the indexer would write.
    let index_path = dir.join("index");
    index.save(&index_path).unwrap();
    Querier::new(Index::load(&index_path).unwrap(), store)
}

fn run(querier: &Querier, input: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    querier.run(Cursor::new(input), &mut out, &mut err, false).unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn scores(querier: &Querier, line: &str) -> Vec<(u32, u32)> {
    querier.answer(line).unwrap().hits.into_iter().map(|h| (h.doc_id, h.score)).collect()
}

/// cat: {1:3, 2:1, 4:2}  dog: {1:1, 2:5, 3:2}  bird: {3:4}
fn animals(dir: &Path) -> Querier {
    build_corpus(
        dir,
        &[
            "cat cat cat dog",
            "cat dog dog dog dog dog",
            "dog dog bird bird bird bird",
            "cat cat",
        ],
    )
}

#[test]
fn single_page_end_to_end() {
    let dir = tempdir().unwrap();
    let querier = build_corpus(dir.path(), &["apple apple banana"]);
    let (out, err) = run(&querier, "apple\nApple AND banana\ncherry\n");
    assert_eq!(
        out,
        "Query: apple\n\
         score    2 doc   1: http://example.com/\n\
         Query: apple and banana\n\
         score    1 doc   1: http://example.com/\n\
         Query: cherry\n\
         No documents match.\n"
    );
    assert!(err.is_empty());
}

#[test]
fn and_takes_minimum() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    assert_eq!(scores(&q, "cat and dog"), vec![(1, 1), (2, 1)]);
    assert_eq!(scores(&q, "cat dog"), vec![(1, 1), (2, 1)]);
    assert!(scores(&q, "cat and bird").is_empty());
}

#[test]
fn or_sums() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    assert_eq!(scores(&q, "cat or dog"), vec![(2, 6), (1, 4), (3, 2), (4, 2)]);
    assert_eq!(scores(&q, "cat or unicorn"), vec![(1, 3), (4, 2), (2, 1)]);
}

#[test]
fn and_binds_tighter_than_or() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    assert_eq!(scores(&q, "cat and dog or bird"), vec![(3, 4), (1, 1), (2, 1)]);
    assert_eq!(scores(&q, "bird or cat and dog"), vec![(3, 4), (1, 1), (2, 1)]);
    assert_eq!(scores(&q, "cat and unicorn or bird"), vec![(3, 4)]);
    assert_eq!(scores(&q, "dog and bird or cat and dog"), vec![(3, 2), (1, 1), (2, 1)]);
}

#[test]
fn evaluate_matches_index_counts() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    let query = Query::parse("cat or dog").unwrap();
    let result = query.evaluate(q.index());
    for doc_id in 1..=4 {
        let cat = q.index().find("cat").map_or(0, |c| c.get(doc_id));
        let dog = q.index().find("dog").map_or(0, |c| c.get(doc_id));
        assert_eq!(result.get(doc_id), cat + dog);
    }
}

#[test]
fn prints_ranked_lines_with_urls() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    let (out, _) = run(&q, "cat or dog\n");
    assert_eq!(
        out,
        "Query: cat or dog\n\
         score    6 doc   2: http://example.com/2.html\n\
         score    4 doc   1: http://example.com/\n\
         score    2 doc   3: http://example.com/3.html\n\
         score    2 doc   4: http://example.com/4.html\n"
    );
}

#[test]
fn bad_lines_are_reported_and_skipped() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    let (out, err) = run(&q, "and cat\ncat or\ncat and and dog\ncat5\nbird\n");
    assert_eq!(out, "Query: bird\nscore    4 doc   3: http://example.com/3.html\n");
    let errors: Vec<&str> = err.lines().collect();
    assert_eq!(
        errors,
        vec![
            "Error: 'and' cannot be first",
            "Error: 'or' cannot be last",
            "Error: 'and' and 'and' cannot be adjacent",
            "Error: bad character '5' in query",
        ]
    );
}

#[test]
fn blank_line_matches_nothing() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    let (out, err) = run(&q, "\n   \n");
    assert_eq!(out, "No documents match.\nNo documents match.\n");
    assert!(err.is_empty());
}

#[test]
fn prompt_only_when_asked() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    let mut out = Vec::new();
    q.run(Cursor::new("bird\n"), &mut out, &mut Vec::<u8>::new(), true).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("Query? Query: bird\n"));
    assert!(out.ends_with("Query? "));
}

#[test]
fn missing_page_file_drops_only_its_line() {
    let dir = tempdir().unwrap();
    let q = animals(dir.path());
    std::fs::remove_file(dir.path().join("pages").join("3")).unwrap();
    let (out, err) = run(&q, "cat or dog\n");
    assert_eq!(
        out,
        "Query: cat or dog\n\
         score    6 doc   2: http://example.com/2.html\n\
         score    4 doc   1: http://example.com/\n\
         score    2 doc   4: http://example.com/4.html\n"
    );
    assert!(err.is_empty());
}

#[test]
fn huge_counts_saturate_under_or() {
    let index = Index::read_from(Cursor::new("apple 1 4294967295\nbanana 1 1 2 3\n")).unwrap();
    let result = Query::parse("apple or banana").unwrap().evaluate(&index);
    assert_eq!(result.get(1), u32::MAX);
    assert_eq!(result.get(2), 3);
}
