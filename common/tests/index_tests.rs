use std::io::Cursor;
use tempfile::tempdir;
use tse_common::{Index, IndexError};

fn sample() -> Index {
    let mut idx = Index::new();
    for (word, doc, times) in [("apple", 1, 3), ("apple", 4, 1), ("banana", 2, 2), ("cherry", 1, 1), ("cherry", 1000, 1), ("cherry", 1500, 7)] {
        for _ in 0..times {
            idx.insert(word, doc).unwrap();
        }
    }
    idx
}

#[test]
fn save_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index");
    let idx = sample();
    idx.save(&path).unwrap();
    let loaded = Index::load(&path).unwrap();
    assert_eq!(loaded, idx);
    // Counts survive verbatim, including doc ids past 1000.
    assert_eq!(loaded.find("apple").unwrap().get(1), 3);
    assert_eq!(loaded.find("cherry").unwrap().get(1500), 7);
}

#[test]
fn resave_is_identical() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a");
    let second = dir.path().join("b");
    sample().save(&first).unwrap();
    Index::load(&first).unwrap().save(&second).unwrap();
    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn reads_unordered_pairs_and_extra_whitespace() {
    let text = "dog  3 1   1 2\n\ncat 2 5\n";
    let idx = Index::read_from(Cursor::new(text)).unwrap();
    assert_eq!(idx.len(), 2);
    let dog: Vec<_> = idx.find("dog").unwrap().iter().collect();
    assert_eq!(dog, vec![(1, 2), (3, 1)]);
    assert_eq!(idx.find("cat").unwrap().get(2), 5);
}

#[test]
fn empty_file_is_empty_index() {
    let idx = Index::read_from(Cursor::new("")).unwrap();
    assert!(idx.is_empty());
}

#[test]
fn malformed_files_are_format_errors() {
    let cases = [
        ("apple 1\n", 1),
        ("apple 1 x\n", 1),
        ("apple\n", 1),
        ("apple 0 2\n", 1),
        ("apple 1 0\n", 1),
        ("apple 1 1\nApple 2 2\n", 2),
        ("apple 1 1\nab 2 2\n", 2),
        ("apple 1 1\napple 2 2\n", 2),
        ("apple -1 2\n", 1),
    ];
    for (text, expected_line) in cases {
        match Index::read_from(Cursor::new(text)) {
            Err(IndexError::Format { line, .. }) => assert_eq!(line, expected_line, "{text:?}"),
            other => panic!("{text:?} gave {other:?}"),
        }
    }
}

#[test]
fn non_utf8_line_is_a_format_error() {
    let bytes = b"apple 1 1\n\xff\xfe 2 2\n".to_vec();
    match Index::read_from(Cursor::new(bytes)) {
        Err(IndexError::Format { line, .. }) => assert_eq!(line, 2),
        other => panic!("gave {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(Index::load(dir.path().join("nope")), Err(IndexError::Io(_))));
}
