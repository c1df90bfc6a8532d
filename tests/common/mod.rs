#![allow(dead_code)]
use std::path::{Path, PathBuf};
use xmlrecords::{MappingEntry, MappingTable, Record};

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn fixture_path(filename: &str) -> PathBuf {
    Path::new(&fixtures_dir()).join(filename)
}

pub fn load_fixture(filename: &str) -> Vec<u8> {
    let path = fixture_path(filename);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Table from `(source_path, header_path, label)` triples.
pub fn table(rows: &[(&str, &str, &str)]) -> MappingTable {
    MappingTable::build(
        rows.iter()
            .map(|(source, header, label)| MappingEntry::new(source, header, label)),
    )
}

pub fn record(header: Option<&str>, header_changed: bool, label: &str, text: &str) -> Record {
    Record {
        header: header.map(str::to_string),
        header_changed,
        label: label.to_string(),
        text: text.to_string(),
    }
}

pub fn plain(label: &str, text: &str) -> Record {
    record(None, false, label, text)
}
