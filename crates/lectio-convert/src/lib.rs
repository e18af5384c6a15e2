//! Format converters
//!
//! Each source encoding gets one converter implementing [`SourceConverter`]:
//!
//! - [`DictConverter`]: `{book: {chapter: {verse: text}}}` with stringified keys
//! - [`RowStreamConverter`]: `resultset.row[].field` records with packed `BBCCCVVV` ids
//! - [`FetchResultConverter`]: arrays of already-segmented chapters
//!
//! Converters never fail on missing data. A missing book, chapter or verse is
//! recorded as a [`Warning`] and the (possibly partial) translation is returned.
//! Only a document that does not have the converter's structure is an error.

mod assemble;
pub mod dict;
pub mod fetch;
pub mod rows;
pub mod shape;

pub use dict::DictConverter;
pub use fetch::FetchResultConverter;
pub use rows::RowStreamConverter;
pub use shape::SourceShape;

use lectio_core::{AliasTable, Result, Translation, Warning};
use serde_json::Value;
use tracing::debug;

/// Output of one conversion: the translation plus everything that was skipped or filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub translation: Translation,
    pub warnings: Vec<Warning>,
}

/// Common contract for all source encodings.
pub trait SourceConverter {
    /// The structural shape this converter accepts
    fn shape(&self) -> SourceShape;

    /// Convert a parsed source document into canonical form.
    fn convert(&self, code: &str, source: &Value) -> Result<Conversion>;
}

/// Pick the converter for a detected shape.
pub fn converter_for<'a>(
    shape: SourceShape,
    aliases: &'a AliasTable,
) -> Box<dyn SourceConverter + 'a> {
    match shape {
        SourceShape::DictOfChapters => Box::new(DictConverter::new(aliases)),
        SourceShape::RowStream => Box::new(RowStreamConverter::new(aliases)),
        SourceShape::FetchResult => Box::new(FetchResultConverter::new(aliases)),
    }
}

/// Detect the document's shape and run exactly one converter over it.
pub fn convert_document(
    code: &str,
    source: &Value,
    aliases: &AliasTable,
) -> Result<(SourceShape, Conversion)> {
    let shape = SourceShape::detect(source, aliases)?;
    debug!("{}: detected {} source", code, shape);
    let conversion = converter_for(shape, aliases).convert(code, source)?;
    Ok((shape, conversion))
}
