//! Book-name alias table
//!
//! Resolves free-form spellings ("Song", "1 cor", "PSALM") to one canonical
//! abbreviation. The table is merged from three sources in priority order:
//!
//! 1. canonical full names (and the canonical abbreviations themselves)
//! 2. the curated per-book alias lists
//! 3. book-specific special cases
//!
//! A later source may add keys but never re-bind one to a different book; that
//! is an [`CorpusError::AliasCollision`] raised while building, not at lookup.

use crate::canon::{BookEntry, CANON};
use crate::error::{CorpusError, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// Which registry source bound a spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasSource {
    CanonicalName,
    Curated,
    SpecialCase,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    book: usize,
    source: AliasSource,
}

/// Lower-case a spelling and drop all whitespace.
pub fn normalize_spelling(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Read-only mapping from normalized spelling to canonical book.
#[derive(Debug, Clone)]
pub struct AliasTable {
    books: Vec<BookEntry>,
    bindings: BTreeMap<String, Binding>,
}

impl AliasTable {
    /// Build a table over an arbitrary registry slice.
    ///
    /// The result depends only on `books`, so rebuilding after the registry
    /// grows always yields the same table for the same input.
    pub fn build(books: &[BookEntry]) -> Result<Self> {
        let mut table = Self {
            books: books.to_vec(),
            bindings: BTreeMap::new(),
        };

        for (index, book) in books.iter().enumerate() {
            table.bind(book.name, index, AliasSource::CanonicalName)?;
            table.bind(book.abbrev, index, AliasSource::CanonicalName)?;
        }
        for (index, book) in books.iter().enumerate() {
            for alias in book.aliases {
                table.bind(alias, index, AliasSource::Curated)?;
            }
        }
        for (index, book) in books.iter().enumerate() {
            for alias in book.special_aliases {
                table.bind(alias, index, AliasSource::SpecialCase)?;
            }
        }

        debug!(
            "Built alias table: {} spellings over {} books",
            table.bindings.len(),
            table.books.len()
        );
        Ok(table)
    }

    /// The process-wide table over [`CANON`], built on first use.
    pub fn standard() -> Result<&'static AliasTable> {
        static TABLE: OnceCell<AliasTable> = OnceCell::new();
        TABLE.get_or_try_init(|| AliasTable::build(&CANON))
    }

    fn bind(&mut self, spelling: &str, book: usize, source: AliasSource) -> Result<()> {
        let key = normalize_spelling(spelling);
        if key.is_empty() {
            return Ok(());
        }

        match self.bindings.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(Binding { book, source });
            }
            Entry::Occupied(slot) => {
                let existing = slot.get().book;
                if existing != book {
                    return Err(CorpusError::AliasCollision {
                        alias: slot.key().clone(),
                        existing: self.books[existing].abbrev.to_string(),
                        incoming: self.books[book].abbrev.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve a raw spelling to its canonical abbreviation.
    pub fn resolve(&self, raw: &str) -> Option<&'static str> {
        self.lookup(raw).map(|entry| entry.abbrev)
    }

    /// Resolve a raw spelling to its registry entry.
    pub fn lookup(&self, raw: &str) -> Option<&BookEntry> {
        self.lookup_index(raw).map(|index| &self.books[index])
    }

    /// Resolve a raw spelling to the book's 0-based position in the registry.
    pub fn lookup_index(&self, raw: &str) -> Option<usize> {
        self.bindings
            .get(&normalize_spelling(raw))
            .map(|binding| binding.book)
    }

    /// Which source bound this spelling, if any.
    pub fn source_of(&self, raw: &str) -> Option<AliasSource> {
        self.bindings
            .get(&normalize_spelling(raw))
            .map(|binding| binding.source)
    }

    /// Registry the table was built from, in canonical order.
    pub fn books(&self) -> &[BookEntry] {
        &self.books
    }

    /// Number of distinct spellings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All `(spelling, abbrev)` pairs, sorted by spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.bindings
            .iter()
            .map(|(key, binding)| (key.as_str(), self.books[binding.book].abbrev))
    }

    /// Structured export for embedding in a consumer application.
    pub fn export(&self) -> AliasExport {
        AliasExport {
            aliases: self
                .iter()
                .map(|(key, abbrev)| (key.to_string(), abbrev.to_string()))
                .collect(),
            names: self
                .books
                .iter()
                .map(|entry| (entry.abbrev.to_string(), entry.name.to_string()))
                .collect(),
        }
    }

    /// Export as JavaScript source: the alias literal sorted by key, followed by
    /// a reverse lookup function in canonical order.
    pub fn to_js_source(&self) -> String {
        let mut out = String::new();
        out.push_str("// BOOK_NAMES - maps user input to Bible data abbreviations\n");
        out.push_str("const BOOK_NAMES = {\n");
        for (key, abbrev) in self.iter() {
            let _ = writeln!(out, "    '{}': '{}',", js_escape(key), js_escape(abbrev));
        }
        out.push_str("};\n\n");
        out.push_str("// Reverse mapping for display\n");
        out.push_str("function getBookName(abbrev) {\n");
        out.push_str("    const bookMap = {\n");
        for entry in &self.books {
            let _ = writeln!(
                out,
                "        '{}': '{}',",
                js_escape(entry.abbrev),
                js_escape(entry.name)
            );
        }
        out.push_str("    };\n");
        out.push_str("    return bookMap[abbrev] || abbrev;\n");
        out.push_str("}\n");
        out
    }
}

fn js_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// JSON form of the alias export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasExport {
    /// Normalized spelling -> canonical abbreviation
    pub aliases: BTreeMap<String, String>,
    /// Canonical abbreviation -> display name
    pub names: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static AliasTable {
        AliasTable::standard().expect("standard registry has no collisions")
    }

    #[test]
    fn normalize_strips_whitespace_and_case() {
        assert_eq!(normalize_spelling("  Song of\tSolomon "), "songofsolomon");
        assert_eq!(normalize_spelling("1 COR"), "1cor");
    }

    #[test]
    fn song_of_solomon_variants_agree() {
        let expected = table().resolve("Song of Solomon");
        assert_eq!(expected, Some("so"));
        for raw in ["Song", "SOS", "song of solomon", "songofsongs", "Canticles"] {
            assert_eq!(table().resolve(raw), expected, "{raw}");
        }
    }

    #[test]
    fn resolves_names_abbrevs_and_curated_aliases() {
        assert_eq!(table().resolve("Genesis"), Some("gn"));
        assert_eq!(table().resolve("gn"), Some("gn"));
        assert_eq!(table().resolve("Gen"), Some("gn"));
        assert_eq!(table().resolve("1 Corinthians"), Some("1co"));
        assert_eq!(table().resolve("1 cor"), Some("1co"));
        assert_eq!(table().resolve("Psalm"), Some("ps"));
        assert_eq!(table().resolve("Rev"), Some("re"));
    }

    #[test]
    fn shared_short_forms_belong_to_one_book() {
        assert_eq!(table().resolve("jn"), Some("jn"));
        assert_eq!(table().lookup("jn").map(|e| e.name), Some("Jonah"));
        assert_eq!(table().lookup("jhn").map(|e| e.name), Some("John"));
        assert_eq!(table().lookup("ez").map(|e| e.name), Some("Ezekiel"));
        assert_eq!(table().lookup("jud").map(|e| e.name), Some("Judges"));
    }

    #[test]
    fn unknown_spelling_is_not_found() {
        assert_eq!(table().resolve("Maccabees"), None);
        assert_eq!(table().resolve(""), None);
    }

    #[test]
    fn records_the_binding_source() {
        assert_eq!(
            table().source_of("Song of Solomon"),
            Some(AliasSource::CanonicalName)
        );
        assert_eq!(table().source_of("gen"), Some(AliasSource::Curated));
        assert_eq!(table().source_of("sos"), Some(AliasSource::SpecialCase));
    }

    #[test]
    fn rebinding_to_the_same_book_is_allowed() {
        let books = [BookEntry {
            number: 1,
            name: "Genesis",
            abbrev: "gn",
            chapter_count: 50,
            aliases: &["gn", "gen"],
            special_aliases: &["genesis"],
        }];
        let table = AliasTable::build(&books).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.source_of("gn"), Some(AliasSource::CanonicalName));
    }

    #[test]
    fn collision_between_books_fails_the_build() {
        let books = [
            BookEntry {
                number: 1,
                name: "Jonah",
                abbrev: "jn",
                chapter_count: 4,
                aliases: &["jon"],
                special_aliases: &[],
            },
            BookEntry {
                number: 2,
                name: "John",
                abbrev: "jo",
                chapter_count: 21,
                aliases: &["jn"],
                special_aliases: &[],
            },
        ];
        match AliasTable::build(&books) {
            Err(CorpusError::AliasCollision {
                alias,
                existing,
                incoming,
            }) => {
                assert_eq!(alias, "jn");
                assert_eq!(existing, "jn");
                assert_eq!(incoming, "jo");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn build_is_deterministic() {
        let first = AliasTable::build(&CANON).unwrap().export();
        let second = AliasTable::build(&CANON).unwrap().export();
        assert_eq!(first, second);
        assert_eq!(first.names.len(), 66);
    }

    #[test]
    fn js_export_contains_both_mappings() {
        let source = table().to_js_source();
        assert!(source.starts_with("// BOOK_NAMES"));
        assert!(source.contains("    'songofsolomon': 'so',\n"));
        assert!(source.contains("        're': 'Revelation',\n"));
        assert!(source.trim_end().ends_with('}'));
        let gen_pos = source.find("'gen': 'gn'").unwrap();
        let genesis_pos = source.find("'genesis': 'gn'").unwrap();
        assert!(gen_pos < genesis_pos, "alias literal is sorted by key");
    }
}
