//! Dict-of-chapters converter
//!
//! Source: `{"Genesis": {"1": {"1": "In the beginning…", "2": …}, …}, …}`.
//! Chapter and verse keys are stringified 1-based integers; they are decoded
//! and ordered numerically before being laid out positionally.

use crate::assemble::{assemble_book, assemble_chapter, decode_key, verse_text};
use crate::shape::SourceShape;
use crate::{Conversion, SourceConverter};
use lectio_core::{AliasTable, Book, BookEntry, Chapter, CorpusError, Result, Translation, Warning};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

pub struct DictConverter<'a> {
    aliases: &'a AliasTable,
}

impl<'a> DictConverter<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Group the document's keys by the book they resolve to.
    fn index_keys<'d>(
        &self,
        document: &'d Map<String, Value>,
        warnings: &mut Vec<Warning>,
    ) -> BTreeMap<usize, Vec<&'d str>> {
        let mut keyed: BTreeMap<usize, Vec<&'d str>> = BTreeMap::new();
        for key in document.keys() {
            match self.aliases.lookup_index(key) {
                Some(index) => keyed.entry(index).or_default().push(key),
                None => warnings.push(Warning::UnresolvedBook { name: key.clone() }),
            }
        }
        keyed
    }

    fn convert_book(
        &self,
        entry: &BookEntry,
        value: &Value,
        warnings: &mut Vec<Warning>,
    ) -> Option<Book> {
        let Value::Object(chapters) = value else {
            warnings.push(Warning::MalformedBook {
                book: entry.name.to_string(),
                reason: "expected an object of chapters".to_string(),
            });
            return None;
        };

        let mut numbered: BTreeMap<u16, Chapter> = BTreeMap::new();
        for (key, verses) in chapters {
            let Some(chapter) = decode_key(key) else {
                warnings.push(invalid_key(entry, key));
                continue;
            };
            if numbered.contains_key(&chapter) {
                warnings.push(invalid_key(entry, key));
                continue;
            }
            let Value::Object(verses) = verses else {
                warnings.push(Warning::MalformedBook {
                    book: entry.name.to_string(),
                    reason: format!("chapter '{key}' is not an object of verses"),
                });
                continue;
            };

            let mut verse_map: BTreeMap<u16, String> = BTreeMap::new();
            for (verse_key, text) in verses {
                let Some(verse) = decode_key(verse_key) else {
                    warnings.push(invalid_key(entry, verse_key));
                    continue;
                };
                if verse_map.contains_key(&verse) {
                    warnings.push(Warning::DuplicateVerse {
                        book: entry.name.to_string(),
                        chapter: usize::from(chapter),
                        verse: usize::from(verse),
                    });
                    continue;
                }
                let text = verse_text(
                    entry,
                    usize::from(chapter),
                    usize::from(verse),
                    text.as_str().map(str::to_string),
                    warnings,
                );
                verse_map.insert(verse, text);
            }

            numbered.insert(chapter, assemble_chapter(entry, chapter, verse_map, warnings));
        }

        Some(assemble_book(entry, numbered, warnings))
    }
}

fn invalid_key(entry: &BookEntry, key: &str) -> Warning {
    Warning::InvalidKey {
        book: entry.name.to_string(),
        key: key.to_string(),
    }
}

impl SourceConverter for DictConverter<'_> {
    fn shape(&self) -> SourceShape {
        SourceShape::DictOfChapters
    }

    fn convert(&self, code: &str, source: &Value) -> Result<Conversion> {
        let Value::Object(document) = source else {
            return Err(CorpusError::UnknownBookShape(
                "dict-of-chapters source must be a JSON object".to_string(),
            ));
        };

        let mut warnings = Vec::new();
        let keyed = self.index_keys(document, &mut warnings);
        let mut books = Vec::new();

        for (index, entry) in self.aliases.books().iter().enumerate() {
            let Some(keys) = keyed.get(&index) else {
                warnings.push(Warning::MissingBook {
                    book: entry.name.to_string(),
                });
                continue;
            };

            // The exact canonical title wins over any alias spelling.
            let chosen = keys
                .iter()
                .find(|key| **key == entry.name)
                .or_else(|| keys.first())
                .copied();
            if keys.len() > 1 {
                warnings.push(Warning::DuplicateBook {
                    book: entry.name.to_string(),
                });
            }

            let Some(value) = chosen.and_then(|key| document.get(key)) else {
                continue;
            };
            if let Some(book) = self.convert_book(entry, value, &mut warnings) {
                debug!("{}: {} ({} chapters)", code, entry.name, book.chapters.len());
                books.push(book);
            }
        }

        Ok(Conversion {
            translation: Translation::new(code, books),
            warnings,
        })
    }
}
