//! Fetch-result converter
//!
//! Source: a top-level array assembled one chapter at a time by a remote fetch
//! loop, in one of three layouts:
//!
//! - book objects `{"name": "Genesis", "abbrev": "genesis", "chapters": [[…], null, …]}`
//! - bare arrays of chapters, one per book, whose position gives the canonical book
//! - a flat stream of chapters `[["v1", "v2"], ["v1"], null, …]` running through the
//!   canon; each book takes as many chapters as its canonical chapter count
//!
//! Chapters are already segmented and ordered, so nothing is renumbered. A
//! failed fetch (`null` chapter) stays in place as an empty chapter, keeping
//! chapter positions aligned with the canon. Book abbreviations in the source
//! are ignored in favour of the canonical ones.

use crate::assemble::verse_text;
use crate::shape::SourceShape;
use crate::{Conversion, SourceConverter};
use lectio_core::{AliasTable, Book, BookEntry, Chapter, CorpusError, Result, Translation, Warning};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

type RawChapter = Option<Vec<Option<String>>>;
type RawChapters = Vec<RawChapter>;

#[derive(Debug, Deserialize)]
struct NamedBook {
    name: String,
    #[serde(default)]
    abbrev: Option<String>,
    #[serde(default)]
    chapters: RawChapters,
}

pub struct FetchResultConverter<'a> {
    aliases: &'a AliasTable,
}

impl<'a> FetchResultConverter<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Work out which canonical book an element describes, and its chapters.
    fn identify(
        &self,
        position: usize,
        element: &Value,
        warnings: &mut Vec<Warning>,
    ) -> Option<(usize, RawChapters)> {
        match element {
            Value::Object(_) => {
                let book = match NamedBook::deserialize(element) {
                    Ok(book) => book,
                    Err(e) => {
                        warnings.push(Warning::MalformedRecord {
                            index: position,
                            reason: e.to_string(),
                        });
                        return None;
                    }
                };
                let index = self
                    .aliases
                    .lookup_index(&book.name)
                    .or_else(|| book.abbrev.as_deref().and_then(|a| self.aliases.lookup_index(a)));
                match index {
                    Some(index) => Some((index, book.chapters)),
                    None => {
                        warnings.push(Warning::UnresolvedBook { name: book.name });
                        None
                    }
                }
            }
            Value::Array(_) => {
                if position >= self.aliases.books().len() {
                    warnings.push(Warning::UnresolvedBook {
                        name: format!("#{}", position + 1),
                    });
                    return None;
                }
                match RawChapters::deserialize(element) {
                    Ok(chapters) => Some((position, chapters)),
                    Err(e) => {
                        warnings.push(Warning::MalformedRecord {
                            index: position,
                            reason: e.to_string(),
                        });
                        None
                    }
                }
            }
            _ => {
                warnings.push(Warning::MalformedRecord {
                    index: position,
                    reason: "expected a book object or an array of chapters".to_string(),
                });
                None
            }
        }
    }
}

/// A non-empty array of verse texts (or `null` verses) is a single chapter.
fn is_chapter(element: &Value) -> bool {
    match element {
        Value::Array(items) => {
            !items.is_empty() && items.iter().all(|item| item.is_string() || item.is_null())
        }
        _ => false,
    }
}

/// A document holding only chapters, failed fetches and empty chapters is a flat stream.
fn is_chapter_stream(elements: &[Value]) -> bool {
    elements.iter().any(is_chapter)
        && elements.iter().all(|element| {
            element.is_null()
                || is_chapter(element)
                || element.as_array().is_some_and(Vec::is_empty)
        })
}

/// Cut a flat chapter stream into books by canonical chapter count.
///
/// The book the stream ends in is padded with empty chapters; books after it
/// are missing; chapters after the last book are counted and dropped.
fn split_stream(
    registry: &[BookEntry],
    elements: &[Value],
    warnings: &mut Vec<Warning>,
) -> Vec<Book> {
    let mut stream = elements.iter().enumerate().peekable();
    let mut books = Vec::new();

    for entry in registry {
        if stream.peek().is_none() {
            warnings.push(Warning::MissingBook {
                book: entry.name.to_string(),
            });
            continue;
        }

        let chapter_count = usize::from(entry.chapter_count);
        let chapters: RawChapters = stream
            .by_ref()
            .take(chapter_count)
            .map(|(index, element)| {
                RawChapter::deserialize(element).unwrap_or_else(|e| {
                    warnings.push(Warning::MalformedRecord {
                        index,
                        reason: e.to_string(),
                    });
                    None
                })
            })
            .collect();

        let supplied = chapters.len();
        let mut book = assemble(entry, chapters, warnings);
        for chapter in supplied + 1..=chapter_count {
            warnings.push(Warning::MissingChapter {
                book: entry.name.to_string(),
                chapter,
            });
            book.chapters.push(Vec::new());
        }
        books.push(book);
    }

    let extra = stream.count();
    if extra > 0 {
        warnings.push(Warning::ExtraChapters { count: extra });
    }
    books
}

fn assemble(entry: &BookEntry, chapters: RawChapters, warnings: &mut Vec<Warning>) -> Book {
    let chapters: Vec<Chapter> = chapters
        .into_iter()
        .enumerate()
        .map(|(chapter_index, chapter)| match chapter {
            Some(verses) => verses
                .into_iter()
                .enumerate()
                .map(|(verse_index, text)| {
                    verse_text(entry, chapter_index + 1, verse_index + 1, text, warnings)
                })
                .collect(),
            None => {
                warnings.push(Warning::MissingChapter {
                    book: entry.name.to_string(),
                    chapter: chapter_index + 1,
                });
                Vec::new()
            }
        })
        .collect();
    Book::from_entry(entry, chapters)
}

impl SourceConverter for FetchResultConverter<'_> {
    fn shape(&self) -> SourceShape {
        SourceShape::FetchResult
    }

    fn convert(&self, code: &str, source: &Value) -> Result<Conversion> {
        let Value::Array(elements) = source else {
            return Err(CorpusError::UnknownBookShape(
                "fetch-result source must be a JSON array".to_string(),
            ));
        };

        let registry = self.aliases.books();
        let mut warnings = Vec::new();

        if is_chapter_stream(elements) {
            let books = split_stream(registry, elements, &mut warnings);
            debug!(
                "{}: split {} fetched chapters into {} books",
                code,
                elements.len(),
                books.len()
            );
            return Ok(Conversion {
                translation: Translation::new(code, books),
                warnings,
            });
        }

        let mut slots: Vec<Option<Book>> = vec![None; registry.len()];

        for (position, element) in elements.iter().enumerate() {
            let Some((index, chapters)) = self.identify(position, element, &mut warnings) else {
                continue;
            };
            let entry = &registry[index];
            if slots[index].is_some() {
                warnings.push(Warning::DuplicateBook {
                    book: entry.name.to_string(),
                });
                continue;
            }
            slots[index] = Some(assemble(entry, chapters, &mut warnings));
        }

        let mut books = Vec::new();
        for (entry, slot) in registry.iter().zip(slots) {
            match slot {
                Some(book) => books.push(book),
                None => warnings.push(Warning::MissingBook {
                    book: entry.name.to_string(),
                }),
            }
        }
        debug!("{}: assembled {} fetched books", code, books.len());

        Ok(Conversion {
            translation: Translation::new(code, books),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(source: Value) -> Conversion {
        FetchResultConverter::new(AliasTable::standard().unwrap())
            .convert("WEB", &source)
            .unwrap()
    }

    #[test]
    fn stale_abbreviation_is_replaced() {
        let conversion = convert(json!([
            {"name": "Song of Solomon", "abbrev": "songofsolomon", "chapters": [["I am the rose"]]}
        ]));
        assert_eq!(conversion.translation.books[0].abbrev, "so");
    }

    #[test]
    fn abbrev_is_used_when_name_is_unknown() {
        let conversion = convert(json!([{"name": "Apocalypse", "abbrev": "rev", "chapters": []}]));
        assert_eq!(conversion.translation.books[0].name, "Revelation");
    }

    #[test]
    fn null_verse_is_an_empty_slot() {
        let conversion = convert(json!([{"name": "Jude", "chapters": [["a", null, "c"]]}]));
        assert_eq!(
            conversion.translation.books[0].chapters[0],
            vec!["a".to_string(), String::new(), "c".to_string()]
        );
        assert!(conversion.warnings.contains(&Warning::EmptyVerseSlot {
            book: "Jude".into(),
            chapter: 1,
            verse: 2
        }));
    }

    #[test]
    fn positional_elements_use_canonical_order() {
        let conversion = convert(json!([[["In the beginning"]], [["These are the names"]]]));
        let names: Vec<_> = conversion.translation.books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Genesis", "Exodus"]);
    }

    #[test]
    fn duplicates_and_unknowns_are_warnings() {
        let conversion = convert(json!([
            {"name": "Ruth", "chapters": [["first"]]},
            {"name": "Ruth", "chapters": [["second"]]},
            {"name": "Tobit", "chapters": []},
            42
        ]));
        assert_eq!(conversion.translation.books.len(), 1);
        assert_eq!(conversion.translation.books[0].chapters[0][0], "first");
        assert!(conversion.warnings.contains(&Warning::DuplicateBook { book: "Ruth".into() }));
        assert!(conversion.warnings.contains(&Warning::UnresolvedBook { name: "Tobit".into() }));
        assert!(conversion
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::MalformedRecord { index: 3, .. })));
    }

    #[test]
    fn flat_stream_fills_books_by_chapter_count() {
        let mut chapters: Vec<Value> = (1..=50)
            .map(|c| json!([format!("Genesis {c}:1")]))
            .collect();
        chapters.push(json!(["Exodus 1:1", null]));
        chapters.push(Value::Null);

        let conversion = convert(Value::Array(chapters));
        let books = &conversion.translation.books;

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].chapters.len(), 50);
        assert_eq!(books[0].chapters[49], vec!["Genesis 50:1"]);
        assert_eq!(books[1].name, "Exodus");
        assert_eq!(books[1].chapters.len(), 40);
        assert_eq!(books[1].chapters[0], vec!["Exodus 1:1".to_string(), String::new()]);
        assert!(books[1].chapters[1].is_empty());
        assert!(conversion.warnings.contains(&Warning::EmptyVerseSlot {
            book: "Exodus".into(),
            chapter: 1,
            verse: 2
        }));
        assert!(conversion.warnings.contains(&Warning::MissingChapter {
            book: "Exodus".into(),
            chapter: 40
        }));
        assert!(conversion
            .warnings
            .contains(&Warning::MissingBook { book: "Leviticus".into() }));
    }

    #[test]
    fn flat_stream_past_the_canon_is_counted() {
        let total: usize = lectio_core::CANON
            .iter()
            .map(|entry| usize::from(entry.chapter_count))
            .sum();
        let chapters: Vec<Value> = (0..total + 3).map(|_| json!(["text"])).collect();

        let conversion = convert(Value::Array(chapters));

        assert_eq!(conversion.translation.books.len(), 66);
        assert_eq!(conversion.translation.chapter_count(), total);
        assert_eq!(conversion.warnings, vec![Warning::ExtraChapters { count: 3 }]);
    }

    #[test]
    fn per_book_arrays_are_not_a_flat_stream() {
        assert!(!is_chapter_stream(&[json!([["a"]]), json!([["b"]])]));
        assert!(!is_chapter_stream(&[json!([]), Value::Null]));
        assert!(is_chapter_stream(&[json!(["a", null]), Value::Null, json!([])]));
    }

    #[test]
    fn books_arrive_in_canonical_order_regardless_of_source_order() {
        let conversion = convert(json!([
            {"name": "Revelation", "chapters": [["The Revelation"]]},
            {"name": "Genesis", "chapters": [["In the beginning"]]}
        ]));
        let names: Vec<_> = conversion.translation.books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Genesis", "Revelation"]);
    }
}
