//! Canonical book registry
//!
//! One static table holds every fact the normalizer knows about a book: its
//! canonical position, English title, the reading application's abbreviation,
//! the canonical chapter count and the curated alias spellings. Everything else
//! (alias table, converters, validation) is derived from it.

/// Number of books in a canonical translation.
pub const BOOK_COUNT: usize = 66;

/// One immutable registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    /// 1-based canonical position (Genesis = 1, Revelation = 66)
    pub number: u8,
    /// Canonical English title
    pub name: &'static str,
    /// Canonical abbreviation used by the reading application
    pub abbrev: &'static str,
    /// Canonical chapter count
    pub chapter_count: u16,
    /// Common abbreviations and misspellings
    pub aliases: &'static [&'static str],
    /// Book-specific extra spellings merged after the curated list
    pub special_aliases: &'static [&'static str],
}

impl BookEntry {
    /// 0-based position in canonical order
    pub fn index(&self) -> usize {
        usize::from(self.number) - 1
    }
}

macro_rules! book {
    ($number:literal, $name:literal, $abbrev:literal, $chapters:literal, [$($alias:literal),*]) => {
        book!($number, $name, $abbrev, $chapters, [$($alias),*], [])
    };
    (
        $number:literal,
        $name:literal,
        $abbrev:literal,
        $chapters:literal,
        [$($alias:literal),*],
        [$($special:literal),*]
    ) => {
        BookEntry {
            number: $number,
            name: $name,
            abbrev: $abbrev,
            chapter_count: $chapters,
            aliases: &[$($alias),*],
            special_aliases: &[$($special),*],
        }
    };
}

/// The 66 books in canonical order.
///
/// Aliases never reuse another book's abbreviation: `jn` is Jonah, `ez` is
/// Ezekiel and `jud` is Judges, so John, Ezra and Jude do not list them.
pub static CANON: [BookEntry; BOOK_COUNT] = [
    book!(1, "Genesis", "gn", 50, ["gen", "ge"]),
    book!(2, "Exodus", "ex", 40, ["exo", "exod"]),
    book!(3, "Leviticus", "lv", 27, ["lev"]),
    book!(4, "Numbers", "nm", 36, ["num"]),
    book!(5, "Deuteronomy", "dt", 34, ["deut", "deu"]),
    book!(6, "Joshua", "js", 24, ["josh", "jos"]),
    book!(7, "Judges", "jud", 21, ["judg", "jdg"]),
    book!(8, "Ruth", "rt", 4, ["rut", "ru"]),
    book!(9, "1 Samuel", "1sm", 31, ["1sam", "1sa", "1s"]),
    book!(10, "2 Samuel", "2sm", 24, ["2sam", "2sa", "2s"]),
    book!(11, "1 Kings", "1kgs", 22, ["1ki", "1k"]),
    book!(12, "2 Kings", "2kgs", 25, ["2ki", "2k"]),
    book!(13, "1 Chronicles", "1ch", 29, ["1chr", "1chron"]),
    book!(14, "2 Chronicles", "2ch", 36, ["2chr", "2chron"]),
    book!(15, "Ezra", "ezr", 10, []),
    book!(16, "Nehemiah", "ne", 13, ["neh"]),
    book!(17, "Esther", "et", 10, ["est", "es"]),
    book!(18, "Job", "job", 42, ["jb"]),
    book!(19, "Psalms", "ps", 150, ["psalm", "psa", "pss"]),
    book!(20, "Proverbs", "prv", 31, ["prov", "pro"]),
    book!(21, "Ecclesiastes", "ec", 12, ["ecc", "eccl"]),
    book!(22, "Song of Solomon", "so", 8, [], ["song", "sos", "songofsongs", "canticles"]),
    book!(23, "Isaiah", "is", 66, ["isa"]),
    book!(24, "Jeremiah", "jr", 52, ["jer"]),
    book!(25, "Lamentations", "lm", 5, ["lam"]),
    book!(26, "Ezekiel", "ez", 48, ["eze", "ezek", "ezk"]),
    book!(27, "Daniel", "dn", 12, ["dan", "da"]),
    book!(28, "Hosea", "ho", 14, ["hos"]),
    book!(29, "Joel", "jl", 3, ["joe"]),
    book!(30, "Amos", "am", 9, ["amo"]),
    book!(31, "Obadiah", "ob", 1, ["oba"]),
    book!(32, "Jonah", "jn", 4, ["jon"]),
    book!(33, "Micah", "mi", 7, ["mic"]),
    book!(34, "Nahum", "na", 3, ["nah"]),
    book!(35, "Habakkuk", "hk", 3, ["hab"]),
    book!(36, "Zephaniah", "zp", 3, ["zeph", "zep"]),
    book!(37, "Haggai", "hg", 2, ["hag"]),
    book!(38, "Zechariah", "zc", 14, ["zech", "zec"]),
    book!(39, "Malachi", "ml", 4, ["mal"]),
    book!(40, "Matthew", "mt", 28, ["matt", "mat"]),
    book!(41, "Mark", "mk", 16, ["mar", "mrk", "mr"]),
    book!(42, "Luke", "lk", 24, ["luk", "lu"]),
    book!(43, "John", "jo", 21, ["joh", "jhn"]),
    book!(44, "Acts", "act", 28, ["ac"]),
    book!(45, "Romans", "rm", 16, ["rom", "ro"]),
    book!(46, "1 Corinthians", "1co", 16, ["1cor"]),
    book!(47, "2 Corinthians", "2co", 13, ["2cor"]),
    book!(48, "Galatians", "gl", 6, ["gal", "ga"]),
    book!(49, "Ephesians", "eph", 6, ["ep"]),
    book!(50, "Philippians", "ph", 4, ["phil", "php", "pp"]),
    book!(51, "Colossians", "cl", 4, ["col"]),
    book!(52, "1 Thessalonians", "1ts", 5, ["1thess", "1th"]),
    book!(53, "2 Thessalonians", "2ts", 3, ["2thess", "2th"]),
    book!(54, "1 Timothy", "1tm", 6, ["1tim", "1ti"]),
    book!(55, "2 Timothy", "2tm", 4, ["2tim", "2ti"]),
    book!(56, "Titus", "tt", 3, ["tit", "ti"]),
    book!(57, "Philemon", "phm", 1, ["phlm"]),
    book!(58, "Hebrews", "hb", 13, ["heb"]),
    book!(59, "James", "jm", 5, ["jas", "jam", "ja"]),
    book!(60, "1 Peter", "1pe", 5, ["1pet", "1pt", "1p"]),
    book!(61, "2 Peter", "2pe", 3, ["2pet", "2pt", "2p"]),
    book!(62, "1 John", "1jo", 5, ["1joh", "1jn"]),
    book!(63, "2 John", "2jo", 1, ["2joh", "2jn"]),
    book!(64, "3 John", "3jo", 1, ["3joh", "3jn"]),
    book!(65, "Jude", "jd", 1, []),
    book!(66, "Revelation", "re", 22, ["rev", "rv"]),
];
