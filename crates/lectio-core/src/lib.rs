//! Core types for the lectio scripture normalizer.
//!
//! This crate owns everything the rest of the workspace agrees on:
//!
//! - [`schema`]: the canonical `Translation` / `Book` / `Chapter` shape
//! - [`canon`]: the 66-book registry (names, abbreviations, chapter counts, aliases)
//! - [`alias`]: the alias table that resolves free-form book names
//! - [`address`]: the packed `BBCCCVVV` verse address codec
//! - [`validate`]: schema validation that reports every violation at once
//! - [`reference`]: parsing of human references such as `John 3:16-18`
//!
//! Nothing in here performs I/O. Converters live in `lectio-convert`, and the
//! orchestration (load, convert, validate, persist) lives in `lectio-pipeline`.

pub mod address;
pub mod alias;
pub mod canon;
pub mod error;
pub mod reference;
pub mod schema;
pub mod validate;

pub use address::VerseAddress;
pub use alias::{normalize_spelling, AliasExport, AliasSource, AliasTable};
pub use canon::{BookEntry, BOOK_COUNT, CANON};
pub use error::{CorpusError, Result, Warning};
pub use reference::Reference;
pub use schema::{Book, Chapter, Translation};
pub use validate::{validate, validate_against, Violation};
