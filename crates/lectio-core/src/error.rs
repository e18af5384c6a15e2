//! Error and warning taxonomy
//!
//! [`CorpusError`] is fatal for the unit of work it is raised in (one translation,
//! or the alias table build). [`Warning`] is recoverable: converters collect them
//! next to a possibly partial result and keep going.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by the core and the converters.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The source document could not be read or is not JSON.
    #[error("source '{path}' is unreadable: {reason}")]
    SourceUnreadable {
        /// Path of the source document
        path: PathBuf,
        /// Underlying I/O or parse failure
        reason: String,
    },

    /// None of the known source shapes matched the document.
    #[error("source document matches no known book shape: {0}")]
    UnknownBookShape(String),

    /// A packed verse address decoded to an impossible book, chapter or verse.
    #[error("verse address {packed} is out of range")]
    AddressOutOfRange {
        /// The packed `BBCCCVVV` value
        packed: u64,
    },

    /// Two registry entries claim the same normalized spelling.
    #[error("alias '{alias}' is bound to '{existing}' and cannot also map to '{incoming}'")]
    AliasCollision {
        /// Normalized spelling
        alias: String,
        /// Abbreviation the alias was first bound to
        existing: String,
        /// Abbreviation that tried to re-bind it
        incoming: String,
    },

    /// A human reference such as `John 3:16` could not be parsed or resolved.
    #[error("invalid reference '{input}': {reason}")]
    InvalidReference {
        /// Raw reference text
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specialized Result type for core operations
pub type Result<T> = std::result::Result<T, CorpusError>;

impl CorpusError {
    /// Create a source-unreadable error
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid-reference error
    pub fn invalid_reference(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Recoverable data-completeness findings produced while converting a source.
///
/// Book fields hold the canonical book name. Chapter and verse numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[error("{book}: book missing from source, skipped")]
    MissingBook { book: String },

    #[error("{book} {chapter}: chapter missing from source, left empty")]
    MissingChapter { book: String, chapter: usize },

    #[error("{book} {chapter}:{verse}: verse missing from source, left empty")]
    EmptyVerseSlot {
        book: String,
        chapter: usize,
        verse: usize,
    },

    #[error("record with address {packed} is out of range, dropped")]
    AddressOutOfRange { packed: u64 },

    #[error("record #{index} is malformed ({reason}), dropped")]
    MalformedRecord { index: usize, reason: String },

    #[error("{book}: malformed book entry ({reason}), skipped")]
    MalformedBook { book: String, reason: String },

    #[error("{book} {chapter}:{verse}: duplicate verse, first occurrence kept")]
    DuplicateVerse {
        book: String,
        chapter: usize,
        verse: usize,
    },

    #[error("{book}: book appears more than once, first occurrence kept")]
    DuplicateBook { book: String },

    #[error("'{name}' does not resolve to a canonical book, dropped")]
    UnresolvedBook { name: String },

    #[error("{book}: key '{key}' is not a positive chapter/verse number, dropped")]
    InvalidKey { book: String, key: String },

    #[error("{count} chapters run past the end of the canon, dropped")]
    ExtraChapters { count: usize },
}
