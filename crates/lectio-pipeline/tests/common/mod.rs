//! Common test utilities for pipeline tests.

#![allow(dead_code)]

use anyhow::Result;
use lectio_core::CANON;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp directory.
///
/// Returns the temp directory (which must be kept alive) and the file path.
pub fn create_source_file(name: &str, content: &[u8]) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, content)?;
    Ok((temp_dir, file_path))
}

/// Write another source next to an existing one.
pub fn add_source_file(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(name);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A complete fetch-result document: every book, every chapter, one verse each.
pub fn complete_fetch_document() -> Value {
    let books: Vec<Value> = CANON
        .iter()
        .map(|entry| {
            let chapters: Vec<Vec<String>> = (1..=entry.chapter_count)
                .map(|c| vec![format!("{} {}:1", entry.name, c)])
                .collect();
            json!({"name": entry.name, "abbrev": entry.abbrev, "chapters": chapters})
        })
        .collect();
    Value::Array(books)
}

/// A row-stream record with a packed `BBCCCVVV` id.
pub fn row(packed: u64, text: &str) -> Value {
    json!({"field": [packed, packed / 1_000_000, (packed / 1_000) % 1_000, packed % 1_000, text]})
}
