use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::skip::skip_value;
use super::tokens::{Token, TokenError, TokenReader};
use super::Passage;
use crate::core::reference::VerseRange;
use crate::core::types::BookCode;

/// Top-level key holding the book data in NUSJ corpora
pub const DEFAULT_BOOKS_KEY: &str = "books";

#[derive(Error, Debug)]
pub enum PassageError {
    #[error("Failed to open corpus {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed corpus: {0}")]
    Token(#[from] TokenError),

    #[error("Malformed corpus at byte {offset}: expected {expected}")]
    Structure { offset: u64, expected: String },

    #[error("Corpus has no \"{0}\" section")]
    BooksMissing(String),

    #[error("Book code {0} not found in corpus")]
    BookNotFound(BookCode),

    #[error("No verses found for {0}")]
    NoMatchingVerses(VerseRange),
}

/// Resolves verse ranges against a keyed JSON corpus in one streaming pass
///
/// The corpus is expected to look like
/// `{"books": {"GEN": {"1:1": "In the beginning...", ...}, ...}, ...}`.
/// Only the requested book is entered; everything before it is skipped
/// without decoding and nothing after it is read.
#[derive(Debug, Clone)]
pub struct PassageResolver {
    corpus: PathBuf,
    books_key: String,
}

impl PassageResolver {
    pub fn new(corpus: impl Into<PathBuf>) -> Self {
        Self {
            corpus: corpus.into(),
            books_key: DEFAULT_BOOKS_KEY.to_string(),
        }
    }

    /// Use a different top-level key for the book data
    #[must_use]
    pub fn with_books_key(mut self, key: impl Into<String>) -> Self {
        self.books_key = key.into();
        self
    }

    #[must_use]
    pub fn corpus(&self) -> &Path {
        &self.corpus
    }

    /// Resolve a verse range to its passage text
    ///
    /// # Errors
    ///
    /// Returns `PassageError::Open` if the corpus cannot be opened, a
    /// malformed-corpus error, or a lookup miss (`BookNotFound`,
    /// `NoMatchingVerses`).
    pub fn resolve(&self, range: &VerseRange) -> Result<Passage, PassageError> {
        let file = File::open(&self.corpus).map_err(|source| PassageError::Open {
            path: self.corpus.clone(),
            source,
        })?;
        debug!("Resolving {range} from {}", self.corpus.display());
        self.resolve_from_reader(BufReader::new(file), range)
    }

    /// Resolve a verse range from any buffered corpus stream
    ///
    /// # Errors
    ///
    /// See [`PassageResolver::resolve`].
    pub fn resolve_from_reader<R: BufRead>(
        &self,
        reader: R,
        range: &VerseRange,
    ) -> Result<Passage, PassageError> {
        let mut tokens = TokenReader::new(reader);
        expect_begin_object(&mut tokens, "a top-level object")?;

        while tokens.more()? {
            let key = expect_key(&mut tokens)?;
            if key != self.books_key {
                skip_value(&mut tokens)?;
                continue;
            }

            expect_begin_object(&mut tokens, "an object of books")?;
            while tokens.more()? {
                let code = expect_key(&mut tokens)?;
                if code != range.book_code.as_str() {
                    skip_value(&mut tokens)?;
                    continue;
                }

                expect_begin_object(&mut tokens, &format!("an object of verses for {code}"))?;
                let verses = collect_verses(&mut tokens, range)?;
                if verses.is_empty() {
                    return Err(PassageError::NoMatchingVerses(range.clone()));
                }
                debug!("Matched {} verses for {range}", verses.len());
                return Ok(Passage::new(range.clone(), verses));
            }

            return Err(PassageError::BookNotFound(range.book_code.clone()));
        }

        Err(PassageError::BooksMissing(self.books_key.clone()))
    }
}

/// Walk one book's verse object, keeping texts inside `range` in document order
///
/// Consumes the book's closing brace.
fn collect_verses<R: BufRead>(
    tokens: &mut TokenReader<R>,
    range: &VerseRange,
) -> Result<Vec<String>, PassageError> {
    let mut verses = Vec::new();

    while tokens.more()? {
        let key = expect_key(tokens)?;
        let Some((chapter, verse)) = parse_verse_key(&key) else {
            debug!("Skipping non-verse key {key:?} in {}", range.book_code);
            skip_value(tokens)?;
            continue;
        };

        if !range.contains(chapter, verse) {
            skip_value(tokens)?;
            continue;
        }

        let offset = tokens.offset();
        match tokens.next_token()? {
            Token::String(text) => verses.push(text),
            _ => {
                return Err(PassageError::Structure {
                    offset,
                    expected: format!("verse text for {} {key}", range.book_code),
                })
            }
        }
    }

    let offset = tokens.offset();
    match tokens.next_token()? {
        Token::EndObject => Ok(verses),
        _ => Err(PassageError::Structure {
            offset,
            expected: format!("end of book {}", range.book_code),
        }),
    }
}

/// Parse a `"<chapter>:<verse>"` key; anything else is `None`
#[must_use]
pub fn parse_verse_key(key: &str) -> Option<(u32, u32)> {
    let (chapter, verse) = key.split_once(':')?;
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_number(chapter) || !is_number(verse) {
        return None;
    }
    Some((chapter.parse().ok()?, verse.parse().ok()?))
}

fn expect_begin_object<R: BufRead>(
    tokens: &mut TokenReader<R>,
    expected: &str,
) -> Result<(), PassageError> {
    let offset = tokens.offset();
    match tokens.next_token()? {
        Token::BeginObject => Ok(()),
        _ => Err(PassageError::Structure {
            offset,
            expected: expected.to_string(),
        }),
    }
}

fn expect_key<R: BufRead>(tokens: &mut TokenReader<R>) -> Result<String, PassageError> {
    let offset = tokens.offset();
    match tokens.next_token()? {
        Token::String(key) => Ok(key),
        _ => Err(PassageError::Structure {
            offset,
            expected: "an object key".to_string(),
        }),
    }
}
