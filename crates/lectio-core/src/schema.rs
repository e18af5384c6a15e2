//! Canonical schema
//!
//! The output contract every translation is normalized into: an ordered array
//! of books, each holding chapters as arrays of verse strings. Positions are
//! 0-based (index 0 is chapter 1, verse 1) and never keyed by number.

use crate::canon::BookEntry;
use crate::error::Result;
use crate::reference::Reference;
use serde::{Deserialize, Serialize};

/// Ordered verse texts. An empty string marks a verse the source did not supply.
pub type Chapter = Vec<String>;

/// One book in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub abbrev: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Create a book carrying the registry's canonical name and abbreviation.
    pub fn from_entry(entry: &BookEntry, chapters: Vec<Chapter>) -> Self {
        Self {
            name: entry.name.to_string(),
            abbrev: entry.abbrev.to_string(),
            chapters,
        }
    }

    /// 1-based chapter lookup
    pub fn chapter(&self, number: usize) -> Option<&Chapter> {
        self.chapters.get(number.checked_sub(1)?)
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(Vec::len).sum()
    }
}

/// A complete (or partial) translation in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Short code, e.g. `KJV`
    pub code: String,
    /// Books in canonical order
    pub books: Vec<Book>,
}

impl Translation {
    pub fn new(code: impl Into<String>, books: Vec<Book>) -> Self {
        Self {
            code: code.into(),
            books,
        }
    }

    /// Parse an already-canonical document (array of books).
    pub fn from_canonical_json(code: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let books: Vec<Book> = serde_json::from_slice(bytes)?;
        Ok(Self::new(code, books))
    }

    /// Serialize the books array: UTF-8 without BOM, non-ASCII left unescaped.
    /// `pretty` uses two-space indentation.
    pub fn to_canonical_json(&self, pretty: bool) -> Result<Vec<u8>> {
        let bytes = if pretty {
            serde_json::to_vec_pretty(&self.books)?
        } else {
            serde_json::to_vec(&self.books)?
        };
        Ok(bytes)
    }

    /// Find a book by canonical abbreviation.
    pub fn book(&self, abbrev: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.abbrev == abbrev)
    }

    pub fn chapter_count(&self) -> usize {
        self.books.iter().map(|book| book.chapters.len()).sum()
    }

    pub fn verse_count(&self) -> usize {
        self.books.iter().map(Book::verse_count).sum()
    }

    /// Text of the referenced verses joined by single spaces.
    ///
    /// Verses that are absent or empty are skipped; `None` when nothing was found.
    pub fn passage(&self, reference: &Reference) -> Option<String> {
        let chapter = self
            .book(&reference.abbrev)?
            .chapter(usize::from(reference.chapter))?;

        let verses: Vec<&str> = (reference.start_verse..=reference.end_verse)
            .filter_map(|verse| chapter.get(usize::from(verse).checked_sub(1)?))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
            .collect();

        if verses.is_empty() {
            None
        } else {
            Some(verses.join(" "))
        }
    }
}
