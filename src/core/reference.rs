use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::core::book;
use crate::core::types::{BookCode, VerseId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Invalid reference '{0}': expected BOOK CHAPTER:VERSE[-VERSE]")]
    InvalidFormat(String),

    #[error("Unknown book '{0}'")]
    UnknownBook(String),

    #[error("Chapter and verse numbers start at 1 (got {chapter}:{verse_start})")]
    ZeroChapterOrVerse { chapter: u32, verse_start: u32 },

    #[error("Verse range {verse_start}-{verse_end} ends before it starts")]
    ReversedRange { verse_start: u32, verse_end: u32 },
}

/// A contiguous run of verses inside one chapter of one book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRange {
    pub book_code: BookCode,
    pub chapter: u32,
    pub verse_start: u32,
    pub verse_end: u32,
}

impl VerseRange {
    /// Build a range, rejecting zero chapters/verses and reversed bounds
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::ZeroChapterOrVerse` or
    /// `ReferenceError::ReversedRange` when the bounds are invalid.
    pub fn new(
        book_code: impl Into<String>,
        chapter: u32,
        verse_start: u32,
        verse_end: u32,
    ) -> Result<Self, ReferenceError> {
        let range = Self {
            book_code: BookCode::new(book_code),
            chapter,
            verse_start,
            verse_end,
        };
        range.validate()?;
        Ok(range)
    }

    /// Check the numeric invariants of a range (used after deserializing)
    ///
    /// # Errors
    ///
    /// See [`VerseRange::new`].
    pub fn validate(&self) -> Result<(), ReferenceError> {
        if self.chapter == 0 || self.verse_start == 0 {
            return Err(ReferenceError::ZeroChapterOrVerse {
                chapter: self.chapter,
                verse_start: self.verse_start,
            });
        }
        if self.verse_start > self.verse_end {
            return Err(ReferenceError::ReversedRange {
                verse_start: self.verse_start,
                verse_end: self.verse_end,
            });
        }
        Ok(())
    }

    /// Whether `chapter:verse` falls inside this range (inclusive)
    #[must_use]
    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        chapter == self.chapter && (self.verse_start..=self.verse_end).contains(&verse)
    }

    /// Human-readable label using the English book name when known
    #[must_use]
    pub fn label(&self) -> String {
        let book = book::name_for_code(self.book_code.as_str()).unwrap_or(self.book_code.as_str());
        format!("{book} {}", self.verse_span())
    }

    fn verse_span(&self) -> String {
        if self.verse_start == self.verse_end {
            format!("{}:{}", self.chapter, self.verse_start)
        } else {
            format!("{}:{}-{}", self.chapter, self.verse_start, self.verse_end)
        }
    }
}

impl std::fmt::Display for VerseRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.book_code, self.verse_span())
    }
}

/// Parses `GEN 1:1-3`, `John 3:16` or `1 John 4:7-8`.
///
/// Book names from the book table and known codes are normalized to the
/// canonical code. Any other single alphanumeric token is taken verbatim
/// (upper-cased) as a code so corpora with extra books stay reachable.
impl FromStr for VerseRange {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReferenceError::InvalidFormat(s.to_string());

        let (book_part, span) = s.trim().rsplit_once(char::is_whitespace).ok_or_else(invalid)?;
        let book_part = book_part.trim();
        if book_part.is_empty() {
            return Err(invalid());
        }

        let (chapter, verses) = span.split_once(':').ok_or_else(invalid)?;
        let chapter: u32 = chapter.parse().map_err(|_| invalid())?;
        let (verse_start, verse_end) = match verses.split_once('-') {
            Some((start, end)) => (
                start.parse().map_err(|_| invalid())?,
                end.parse().map_err(|_| invalid())?,
            ),
            None => {
                let verse: u32 = verses.parse().map_err(|_| invalid())?;
                (verse, verse)
            }
        };

        let code = match book::resolve_book(book_part) {
            Some(code) => code.to_string(),
            None if book_part.chars().all(|c| c.is_ascii_alphanumeric()) => {
                book_part.to_ascii_uppercase()
            }
            None => return Err(ReferenceError::UnknownBook(book_part.to_string())),
        };

        Self::new(code, chapter, verse_start, verse_end)
    }
}

/// A catalog entry: a verse range with its stable identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseReference {
    /// Unique identifier, stable across runs
    pub id: VerseId,

    #[serde(flatten)]
    pub range: VerseRange,
}

impl VerseReference {
    #[must_use]
    pub fn new(id: u32, range: VerseRange) -> Self {
        Self {
            id: VerseId::new(id),
            range,
        }
    }
}

impl std::fmt::Display for VerseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_reference() {
        let range: VerseRange = "GEN 1:1-3".parse().unwrap();
        assert_eq!(range, VerseRange::new("GEN", 1, 1, 3).unwrap());
    }

    #[test]
    fn test_parse_name_reference_single_verse() {
        let range: VerseRange = "John 3:16".parse().unwrap();
        assert_eq!(range.book_code.as_str(), "JHN");
        assert_eq!((range.verse_start, range.verse_end), (16, 16));
    }

    #[test]
    fn test_parse_multi_word_book_name() {
        let range: VerseRange = "1 John 4:7-8".parse().unwrap();
        assert_eq!(range.book_code.as_str(), "1JN");

        let range: VerseRange = "Song of Solomon 2:4".parse().unwrap();
        assert_eq!(range.book_code.as_str(), "SNG");
    }

    #[test]
    fn test_parse_unknown_code_is_kept() {
        let range: VerseRange = "tob 1:1".parse().unwrap();
        assert_eq!(range.book_code.as_str(), "TOB");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            "GEN".parse::<VerseRange>(),
            Err(ReferenceError::InvalidFormat(_))
        ));
        assert!(matches!(
            "GEN 1".parse::<VerseRange>(),
            Err(ReferenceError::InvalidFormat(_))
        ));
        assert!(matches!(
            "GEN 1:x".parse::<VerseRange>(),
            Err(ReferenceError::InvalidFormat(_))
        ));
        assert!(matches!(
            "Book of Stuff 1:1".parse::<VerseRange>(),
            Err(ReferenceError::UnknownBook(_))
        ));
        assert!(matches!(
            "GEN 1:5-2".parse::<VerseRange>(),
            Err(ReferenceError::ReversedRange { .. })
        ));
        assert!(matches!(
            "GEN 0:1".parse::<VerseRange>(),
            Err(ReferenceError::ZeroChapterOrVerse { .. })
        ));
    }

    #[test]
    fn test_contains_is_inclusive_and_chapter_bound() {
        let range = VerseRange::new("PSA", 23, 1, 3).unwrap();
        assert!(range.contains(23, 1));
        assert!(range.contains(23, 3));
        assert!(!range.contains(23, 4));
        assert!(!range.contains(24, 2));
    }

    #[test]
    fn test_display_and_label() {
        let single = VerseRange::new("JHN", 3, 16, 16).unwrap();
        assert_eq!(single.to_string(), "JHN 3:16");
        assert_eq!(single.label(), "John 3:16");

        let span = VerseRange::new("XYZ", 1, 2, 4).unwrap();
        assert_eq!(span.label(), "XYZ 1:2-4");
    }

    #[test]
    fn test_verse_reference_json_is_flat() {
        let json = r#"{"id":7,"book_code":"GEN","chapter":1,"verse_start":1,"verse_end":2}"#;
        let reference: VerseReference = serde_json::from_str(json).unwrap();
        assert_eq!(reference.id, VerseId::new(7));
        assert_eq!(reference.range, VerseRange::new("GEN", 1, 1, 2).unwrap());

        let back = serde_json::to_value(&reference).unwrap();
        assert_eq!(back["book_code"], "GEN");
        assert_eq!(back["verse_end"], 2);
    }
}
