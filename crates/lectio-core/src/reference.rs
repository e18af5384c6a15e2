//! Human verse references (`John 3:16`, `1 Corinthians 13:4-8`)

use crate::alias::AliasTable;
use crate::error::{CorpusError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([\d\s]*[a-z]+(?:\s+of\s+[a-z]+)?)\s+(\d+):(\d+)(?:\s*-\s*(\d+))?$")
        .expect("reference pattern is valid")
});

/// A resolved reference: one chapter, an inclusive verse range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub abbrev: String,
    pub chapter: u16,
    pub start_verse: u16,
    pub end_verse: u16,
}

impl Reference {
    /// Parse `<book> <chapter>:<verse>[-<end>]`, resolving the book through `aliases`.
    pub fn parse(input: &str, aliases: &AliasTable) -> Result<Self> {
        let trimmed = input.trim();
        let captures = REFERENCE_RE.captures(trimmed).ok_or_else(|| {
            CorpusError::invalid_reference(input, "expected '<book> <chapter>:<verse>[-<verse>]'")
        })?;

        let book = &captures[1];
        let abbrev = aliases.resolve(book).ok_or_else(|| {
            CorpusError::invalid_reference(input, format!("unknown book '{}'", book.trim()))
        })?;

        let chapter = parse_number(input, &captures[2])?;
        let start_verse = parse_number(input, &captures[3])?;
        let end_verse = match captures.get(4) {
            Some(end) => parse_number(input, end.as_str())?,
            None => start_verse,
        };

        if end_verse < start_verse {
            return Err(CorpusError::invalid_reference(
                input,
                "verse range ends before it starts",
            ));
        }

        Ok(Self {
            abbrev: abbrev.to_string(),
            chapter,
            start_verse,
            end_verse,
        })
    }
}

fn parse_number(input: &str, digits: &str) -> Result<u16> {
    match digits.parse::<u16>() {
        Ok(0) => Err(CorpusError::invalid_reference(input, "chapters and verses start at 1")),
        Ok(number) => Ok(number),
        Err(_) => Err(CorpusError::invalid_reference(input, format!("'{digits}' is too large"))),
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.abbrev, self.chapter, self.start_verse)?;
        if self.end_verse != self.start_verse {
            write!(f, "-{}", self.end_verse)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Reference> {
        Reference::parse(input, AliasTable::standard().unwrap())
    }

    #[test]
    fn parses_single_verse() {
        let reference = parse("John 3:16").unwrap();
        assert_eq!(reference.abbrev, "jo");
        assert_eq!((reference.chapter, reference.start_verse, reference.end_verse), (3, 16, 16));
    }

    #[test]
    fn parses_numbered_book_with_range() {
        let reference = parse("1 Corinthians 13:4-8").unwrap();
        assert_eq!(reference.abbrev, "1co");
        assert_eq!((reference.start_verse, reference.end_verse), (4, 8));
        assert_eq!(reference.to_string(), "1co 13:4-8");
    }

    #[test]
    fn parses_of_phrase_and_aliases() {
        assert_eq!(parse("Song of Solomon 2:1").unwrap().abbrev, "so");
        assert_eq!(parse("  psalm 23:1-6 ").unwrap().abbrev, "ps");
        assert_eq!(parse("ROM 8:28").unwrap().abbrev, "rm");
    }

    #[test]
    fn rejects_unknown_book() {
        let err = parse("Hezekiah 1:1").unwrap_err();
        assert!(err.to_string().contains("unknown book 'Hezekiah'"));
    }

    #[test]
    fn rejects_malformed_and_inverted_ranges() {
        assert!(parse("John 3").is_err());
        assert!(parse("John 3:0").is_err());
        assert!(parse("John 3:18-16").is_err());
        assert!(parse("John 3:99999").is_err());
    }
}
