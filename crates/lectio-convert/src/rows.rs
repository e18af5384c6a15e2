//! Row-stream converter
//!
//! Source: a database export of the form
//! `{"resultset": {"row": [{"field": [1001001, 1, 1, 1, "In the beginning…"]}, …]}}`
//! where `field[0]` is a packed `BBCCCVVV` address and `field[4]` the verse text.
//! Rows are grouped by decoded book and chapter and sorted by decoded verse
//! number, so delivery order does not matter.

use crate::assemble::{assemble_book, assemble_chapter};
use crate::shape::SourceShape;
use crate::{Conversion, SourceConverter};
use lectio_core::{AliasTable, Chapter, Result, Translation, VerseAddress, Warning};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const ID_FIELD: usize = 0;
const TEXT_FIELD: usize = 4;

#[derive(Debug, Deserialize)]
struct RowDocument {
    resultset: ResultSet,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Row {
    field: Vec<Value>,
}

type ChapterRows = BTreeMap<u16, BTreeMap<u16, String>>;

pub struct RowStreamConverter<'a> {
    aliases: &'a AliasTable,
}

impl<'a> RowStreamConverter<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Decode every record and bucket it by book index, chapter and verse.
    fn group(&self, rows: &[Value], warnings: &mut Vec<Warning>) -> BTreeMap<usize, ChapterRows> {
        let mut grouped: BTreeMap<usize, ChapterRows> = BTreeMap::new();

        for (index, raw) in rows.iter().enumerate() {
            let (packed, text) = match parse_row(raw) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    warnings.push(Warning::MalformedRecord { index, reason });
                    continue;
                }
            };

            let address = match VerseAddress::decode(packed) {
                Ok(address) if address.book_index() < self.aliases.books().len() => address,
                _ => {
                    warn!("Dropping record #{} with out-of-range address {}", index, packed);
                    warnings.push(Warning::AddressOutOfRange { packed });
                    continue;
                }
            };

            let verses = grouped
                .entry(address.book_index())
                .or_default()
                .entry(address.chapter)
                .or_default();
            if verses.contains_key(&address.verse) {
                warnings.push(Warning::DuplicateVerse {
                    book: self.aliases.books()[address.book_index()].name.to_string(),
                    chapter: usize::from(address.chapter),
                    verse: usize::from(address.verse),
                });
                continue;
            }
            verses.insert(address.verse, text);
        }

        grouped
    }
}

fn parse_row(raw: &Value) -> std::result::Result<(u64, String), String> {
    let row = Row::deserialize(raw).map_err(|e| format!("not a field record: {e}"))?;

    let packed = match row.field.get(ID_FIELD) {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(digits)) => digits.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| "field[0] is not a packed verse id".to_string())?;

    let text = row
        .field
        .get(TEXT_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| "field[4] is not verse text".to_string())?;

    Ok((packed, text.to_string()))
}

impl SourceConverter for RowStreamConverter<'_> {
    fn shape(&self) -> SourceShape {
        SourceShape::RowStream
    }

    fn convert(&self, code: &str, source: &Value) -> Result<Conversion> {
        let document = RowDocument::deserialize(source)?;
        debug!("{}: {} rows", code, document.resultset.row.len());

        let mut warnings = Vec::new();
        let mut grouped = self.group(&document.resultset.row, &mut warnings);
        let mut books = Vec::new();

        for (index, entry) in self.aliases.books().iter().enumerate() {
            let Some(chapter_rows) = grouped.remove(&index) else {
                warnings.push(Warning::MissingBook {
                    book: entry.name.to_string(),
                });
                continue;
            };

            let chapters: BTreeMap<u16, Chapter> = chapter_rows
                .into_iter()
                .map(|(chapter, verses)| {
                    (chapter, assemble_chapter(entry, chapter, verses, &mut warnings))
                })
                .collect();
            books.push(assemble_book(entry, chapters, &mut warnings));
        }

        Ok(Conversion {
            translation: Translation::new(code, books),
            warnings,
        })
    }
}
