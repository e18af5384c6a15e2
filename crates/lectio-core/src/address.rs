//! Packed verse address codec
//!
//! One row-stream source identifies verses by a single integer laid out as
//! `BBCCCVVV`: `book * 1_000_000 + chapter * 1_000 + verse`.

use crate::canon::BOOK_COUNT;
use crate::error::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const BOOK_FACTOR: u64 = 1_000_000;
const CHAPTER_FACTOR: u64 = 1_000;
const MAX_COMPONENT: u16 = 999;

/// A decoded verse address. All components are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerseAddress {
    pub book: u8,
    pub chapter: u16,
    pub verse: u16,
}

impl VerseAddress {
    /// Build an address, checking `book` ∈ [1,66] and `chapter`, `verse` ∈ [1,999].
    pub fn new(book: u8, chapter: u16, verse: u16) -> Result<Self> {
        let address = Self {
            book,
            chapter,
            verse,
        };
        if address.in_range() {
            Ok(address)
        } else {
            Err(CorpusError::AddressOutOfRange {
                packed: address.encode(),
            })
        }
    }

    /// Decode a packed `BBCCCVVV` integer.
    pub fn decode(packed: u64) -> Result<Self> {
        let book = packed / BOOK_FACTOR;
        let chapter = (packed / CHAPTER_FACTOR) % CHAPTER_FACTOR;
        let verse = packed % CHAPTER_FACTOR;

        if book == 0 || book > BOOK_COUNT as u64 || chapter == 0 || verse == 0 {
            return Err(CorpusError::AddressOutOfRange { packed });
        }

        // All three are bounded by the checks above and the modulus.
        Ok(Self {
            book: book as u8,
            chapter: chapter as u16,
            verse: verse as u16,
        })
    }

    /// Encode back to the packed form. Exact inverse of [`VerseAddress::decode`].
    pub fn encode(&self) -> u64 {
        u64::from(self.book) * BOOK_FACTOR
            + u64::from(self.chapter) * CHAPTER_FACTOR
            + u64::from(self.verse)
    }

    /// 0-based index of the book in canonical order
    pub fn book_index(&self) -> usize {
        usize::from(self.book) - 1
    }

    fn in_range(&self) -> bool {
        (1..=BOOK_COUNT as u8).contains(&self.book)
            && (1..=MAX_COMPONENT).contains(&self.chapter)
            && (1..=MAX_COMPONENT).contains(&self.verse)
    }
}

impl fmt::Display for VerseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.book, self.chapter, self.verse)
    }
}

/// Decode a packed address into `(book, chapter, verse)`.
pub fn decode(packed: u64) -> Result<(u8, u16, u16)> {
    VerseAddress::decode(packed).map(|a| (a.book, a.chapter, a.verse))
}

/// Encode `(book, chapter, verse)` into the packed form.
pub fn encode(book: u8, chapter: u16, verse: u16) -> Result<u64> {
    VerseAddress::new(book, chapter, verse).map(|a| a.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_genesis_one_one() {
        assert_eq!(decode(1_001_001).unwrap(), (1, 1, 1));
    }

    #[test]
    fn decodes_revelation_last_verse() {
        let address = VerseAddress::decode(66_022_021).unwrap();
        assert_eq!(address.book, 66);
        assert_eq!(address.chapter, 22);
        assert_eq!(address.verse, 21);
        assert_eq!(address.book_index(), 65);
    }

    #[test]
    fn psalm_119_keeps_three_digit_verses() {
        assert_eq!(decode(19_119_176).unwrap(), (19, 119, 176));
    }

    #[test]
    fn rejects_book_zero_and_book_sixty_seven() {
        assert!(matches!(
            decode(1_001),
            Err(CorpusError::AddressOutOfRange { packed: 1_001 })
        ));
        assert!(matches!(
            decode(67_001_001),
            Err(CorpusError::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_zero_chapter_or_verse() {
        assert!(decode(1_000_001).is_err());
        assert!(decode(1_001_000).is_err());
    }

    #[test]
    fn new_validates_components() {
        assert!(VerseAddress::new(1, 1, 1).is_ok());
        assert!(VerseAddress::new(0, 1, 1).is_err());
        assert!(VerseAddress::new(1, 1000, 1).is_err());
        assert!(encode(43, 3, 16).unwrap() == 43_003_016);
    }

    #[test]
    fn displays_as_colon_separated_triple() {
        let address = VerseAddress::new(43, 3, 16).unwrap();
        assert_eq!(address.to_string(), "43:3:16");
    }
}
