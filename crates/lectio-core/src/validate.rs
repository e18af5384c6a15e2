//! Schema validation
//!
//! [`validate`] never stops at the first problem: a single pass reports every
//! violation so one run surfaces the whole repair list.

use crate::canon::{BookEntry, CANON};
use crate::schema::Translation;
use serde::Serialize;
use thiserror::Error;

/// A single departure from the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("expected {expected} books, found {found}")]
    BookCount { expected: usize, found: usize },

    #[error("book #{position} '{name}' is not a canonical book")]
    UnknownBook { position: usize, name: String },

    #[error("{book}: missing")]
    MissingBook { book: String },

    #[error("{book}: out of canonical order at position #{position}")]
    BookOutOfOrder { position: usize, book: String },

    #[error("{book}: appears more than once")]
    DuplicateBook { book: String },

    #[error("{book}: abbreviation '{found}' should be '{expected}'")]
    AbbrevMismatch {
        book: String,
        expected: String,
        found: String,
    },

    #[error("{book}: expected {expected} chapters, found {found}")]
    ChapterCount {
        book: String,
        expected: usize,
        found: usize,
    },

    #[error("{book} {chapter}: chapter is empty")]
    EmptyChapter { book: String, chapter: usize },

    #[error("{book} {chapter}:{verse}: verse is empty")]
    EmptyVerseSlot {
        book: String,
        chapter: usize,
        verse: usize,
    },
}

/// Validate against the standard 66-book registry.
pub fn validate(translation: &Translation) -> Vec<Violation> {
    validate_against(translation, &CANON)
}

/// Validate against an arbitrary registry.
pub fn validate_against(translation: &Translation, registry: &[BookEntry]) -> Vec<Violation> {
    let mut violations = Vec::new();

    if translation.books.len() != registry.len() {
        violations.push(Violation::BookCount {
            expected: registry.len(),
            found: translation.books.len(),
        });
    }

    let mut seen = vec![false; registry.len()];
    let mut furthest: Option<usize> = None;

    for (position, book) in translation.books.iter().enumerate() {
        let Some(index) = registry.iter().position(|entry| entry.name == book.name) else {
            violations.push(Violation::UnknownBook {
                position: position + 1,
                name: book.name.clone(),
            });
            continue;
        };
        let entry = &registry[index];

        if seen[index] {
            violations.push(Violation::DuplicateBook {
                book: book.name.clone(),
            });
            continue;
        }
        seen[index] = true;

        match furthest {
            Some(previous) if index < previous => {
                violations.push(Violation::BookOutOfOrder {
                    position: position + 1,
                    book: book.name.clone(),
                });
            }
            _ => furthest = Some(index),
        }

        if book.abbrev != entry.abbrev {
            violations.push(Violation::AbbrevMismatch {
                book: book.name.clone(),
                expected: entry.abbrev.to_string(),
                found: book.abbrev.clone(),
            });
        }

        let expected_chapters = usize::from(entry.chapter_count);
        if book.chapters.len() != expected_chapters {
            violations.push(Violation::ChapterCount {
                book: book.name.clone(),
                expected: expected_chapters,
                found: book.chapters.len(),
            });
        }

        for (chapter_index, chapter) in book.chapters.iter().enumerate() {
            if chapter.is_empty() {
                if chapter_index < expected_chapters {
                    violations.push(Violation::EmptyChapter {
                        book: book.name.clone(),
                        chapter: chapter_index + 1,
                    });
                }
                continue;
            }
            for (verse_index, verse) in chapter.iter().enumerate() {
                if verse.is_empty() {
                    violations.push(Violation::EmptyVerseSlot {
                        book: book.name.clone(),
                        chapter: chapter_index + 1,
                        verse: verse_index + 1,
                    });
                }
            }
        }
    }

    for (index, present) in seen.iter().enumerate() {
        if !present {
            violations.push(Violation::MissingBook {
                book: registry[index].name.to_string(),
            });
        }
    }

    violations
}
