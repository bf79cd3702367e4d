//! Tests for in-memory IO implementations.

use std::io::{ErrorKind, Read, Write};

use crate::io::{Filesystem, MemoryFilesystem, OpenMode, ResourceStream, StringBuffer};

fn mode(s: &str) -> OpenMode {
    OpenMode::parse(s).unwrap()
}

fn read_all(stream: &mut dyn ResourceStream) -> String {
    let mut buf = String::new();
    stream.read_to_string(&mut buf).unwrap();
    buf
}

#[test]
fn string_buffer_reads_initial_contents() {
    let mut buffer = StringBuffer::new(b"hello".to_vec());
    assert_eq!(read_all(&mut buffer), "hello");
    assert_eq!(buffer.contents(), b"hello");
}

#[test]
fn string_buffer_overwrites_from_the_start() {
    let mut buffer = StringBuffer::new(b"hello".to_vec());
    buffer.write_all(b"J").unwrap();
    assert_eq!(buffer.contents(), b"Jello");
}

#[test]
fn written_entries_are_visible_to_clones() {
    let fs = MemoryFilesystem::new();
    let shared = fs.clone();

    let mut stream = fs.open("memory://notes.txt", &mode("w")).unwrap();
    stream.write_all(b"abc").unwrap();
    stream.close().unwrap();

    assert_eq!(shared.contents("memory://notes.txt"), Some(b"abc".to_vec()));
    let mut stream = shared.open("memory://notes.txt", &mode("r")).unwrap();
    assert_eq!(read_all(stream.as_mut()), "abc");
}

#[test]
fn keys_ignore_the_scheme_prefix() {
    let fs = MemoryFilesystem::new();
    fs.insert("memory:///data/a.txt", "x").unwrap();
    assert_eq!(fs.contents("data/a.txt"), Some(b"x".to_vec()));
    assert_eq!(fs.contents("memory://data/a.txt"), Some(b"x".to_vec()));
}

#[test]
fn append_keeps_existing_contents() {
    let fs = MemoryFilesystem::new();
    fs.insert("memory://log", "a").unwrap();

    let mut stream = fs.open("memory://log", &mode("a")).unwrap();
    stream.write_all(b"b").unwrap();
    stream.close().unwrap();

    assert_eq!(fs.contents("memory://log"), Some(b"ab".to_vec()));
}

#[test]
fn truncate_discards_existing_contents() {
    let fs = MemoryFilesystem::new();
    fs.insert("memory://log", "old").unwrap();

    let stream = fs.open("memory://log", &mode("w")).unwrap();
    drop(stream);

    assert_eq!(fs.contents("memory://log"), Some(Vec::new()));
}

#[test]
fn reading_a_missing_entry_is_not_found() {
    let fs = MemoryFilesystem::new();
    let err = fs.open("memory://missing", &mode("r")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = fs.open("memory://missing", &mode("r+")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn exclusive_open_refuses_existing_entries() {
    let fs = MemoryFilesystem::new();
    fs.insert("memory://taken", "x").unwrap();
    let err = fs.open("memory://taken", &mode("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    assert!(fs.open("memory://free", &mode("x")).is_ok());
}

#[test]
fn read_only_entries_reject_writes() {
    let fs = MemoryFilesystem::new();
    fs.insert("memory://ro", "x").unwrap();

    let mut stream = fs.open("memory://ro", &mode("r")).unwrap();
    let err = stream.write_all(b"y").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert_eq!(fs.contents("memory://ro"), Some(b"x".to_vec()));
}

#[test]
fn clear_removes_everything() {
    let fs = MemoryFilesystem::new();
    fs.insert("memory://a", "1").unwrap();
    fs.clear().unwrap();
    assert_eq!(fs.contents("memory://a"), None);
}
