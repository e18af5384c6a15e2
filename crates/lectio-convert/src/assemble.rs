//! Shared assembly steps: numbered entries to gap-free positional sequences.

use lectio_core::{Book, BookEntry, Chapter, Warning};
use std::collections::BTreeMap;

/// Decode a 1-based textual key (`"1"`, `"10"`) to its number.
///
/// Keys are compared as numbers, never as text, so `"10"` sorts after `"9"`.
/// Zero and non-numeric keys are rejected.
pub(crate) fn decode_key(key: &str) -> Option<u16> {
    key.trim().parse::<u16>().ok().filter(|number| *number >= 1)
}

/// Lay 1-based numbered entries out as a 0-based sequence with no gaps.
///
/// `fill` supplies the value for every number below the highest key that has no entry.
pub(crate) fn positional<T>(
    mut numbered: BTreeMap<u16, T>,
    mut fill: impl FnMut(u16) -> T,
) -> Vec<T> {
    let last = numbered.keys().next_back().copied().unwrap_or(0);
    (1..=last)
        .map(|number| numbered.remove(&number).unwrap_or_else(|| fill(number)))
        .collect()
}

/// Build one chapter, filling missing verses with empty strings.
pub(crate) fn assemble_chapter(
    book: &BookEntry,
    chapter: u16,
    verses: BTreeMap<u16, String>,
    warnings: &mut Vec<Warning>,
) -> Chapter {
    positional(verses, |verse| {
        warnings.push(Warning::EmptyVerseSlot {
            book: book.name.to_string(),
            chapter: usize::from(chapter),
            verse: usize::from(verse),
        });
        String::new()
    })
}

/// Build one book, filling missing chapters with empty chapters.
pub(crate) fn assemble_book(
    book: &BookEntry,
    chapters: BTreeMap<u16, Chapter>,
    warnings: &mut Vec<Warning>,
) -> Book {
    let chapters = positional(chapters, |chapter| {
        warnings.push(Warning::MissingChapter {
            book: book.name.to_string(),
            chapter: usize::from(chapter),
        });
        Vec::new()
    });
    Book::from_entry(book, chapters)
}

/// Turn an optional verse into text, recording a blank slot.
pub(crate) fn verse_text(
    book: &BookEntry,
    chapter: usize,
    verse: usize,
    text: Option<String>,
    warnings: &mut Vec<Warning>,
) -> String {
    match text {
        Some(text) if !text.is_empty() => text,
        _ => {
            warnings.push(Warning::EmptyVerseSlot {
                book: book.name.to_string(),
                chapter,
                verse,
            });
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_key_is_numeric_and_one_based() {
        assert_eq!(decode_key("1"), Some(1));
        assert_eq!(decode_key(" 10 "), Some(10));
        assert_eq!(decode_key("0"), None);
        assert_eq!(decode_key("1a"), None);
        assert_eq!(decode_key("-3"), None);
    }

    #[test]
    fn positional_orders_numerically_and_fills_gaps() {
        let numbered: BTreeMap<u16, &str> = [(10, "ten"), (2, "two"), (1, "one"), (9, "nine")]
            .into_iter()
            .collect();
        let mut filled = Vec::new();
        let laid_out = positional(numbered, |n| {
            filled.push(n);
            "-"
        });
        assert_eq!(
            laid_out,
            vec!["one", "two", "-", "-", "-", "-", "-", "-", "nine", "ten"]
        );
        assert_eq!(filled, vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn positional_of_nothing_is_empty() {
        let laid_out: Vec<u8> = positional(BTreeMap::new(), |_| 0);
        assert!(laid_out.is_empty());
    }
}
