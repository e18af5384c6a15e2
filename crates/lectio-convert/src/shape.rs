//! Structural source detection

use lectio_core::{AliasTable, CorpusError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The three source encodings the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceShape {
    /// Top-level object keyed by book name
    DictOfChapters,
    /// `resultset.row` records with packed verse ids
    RowStream,
    /// Top-level array of books or chapter arrays
    FetchResult,
}

impl SourceShape {
    /// Detect the shape from structure alone.
    ///
    /// `resultset.row` wins over everything else; an object is only a
    /// dict-of-chapters source when at least one key resolves to a book.
    pub fn detect(document: &Value, aliases: &AliasTable) -> Result<Self> {
        match document {
            Value::Object(map) => {
                let has_rows = map
                    .get("resultset")
                    .and_then(|resultset| resultset.get("row"))
                    .is_some_and(Value::is_array);
                if has_rows {
                    return Ok(Self::RowStream);
                }
                if map.keys().any(|key| aliases.lookup_index(key).is_some()) {
                    return Ok(Self::DictOfChapters);
                }
                Err(CorpusError::UnknownBookShape(format!(
                    "object with {} keys, none of them a book name",
                    map.len()
                )))
            }
            Value::Array(_) => Ok(Self::FetchResult),
            other => Err(CorpusError::UnknownBookShape(format!(
                "top-level {}",
                json_kind(other)
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DictOfChapters => "dict-of-chapters",
            Self::RowStream => "row-stream",
            Self::FetchResult => "fetch-result",
        }
    }
}

impl fmt::Display for SourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detect(document: Value) -> Result<SourceShape> {
        SourceShape::detect(&document, AliasTable::standard().unwrap())
    }

    #[test]
    fn resultset_rows_are_a_row_stream() {
        let document = json!({"resultset": {"row": []}});
        assert_eq!(detect(document).unwrap(), SourceShape::RowStream);
    }

    #[test]
    fn book_keyed_object_is_dict_of_chapters() {
        let document = json!({"Genesis": {"1": {"1": "In the beginning"}}});
        assert_eq!(detect(document).unwrap(), SourceShape::DictOfChapters);
    }

    #[test]
    fn top_level_array_is_fetch_result() {
        assert_eq!(detect(json!([])).unwrap(), SourceShape::FetchResult);
    }

    #[test]
    fn unrelated_object_is_unknown() {
        let err = detect(json!({"resultset": {"rows": []}, "meta": 1})).unwrap_err();
        assert!(matches!(err, CorpusError::UnknownBookShape(_)));
    }

    #[test]
    fn scalar_is_unknown() {
        let err = detect(json!("KJV")).unwrap_err();
        assert!(err.to_string().contains("top-level string"));
    }
}
