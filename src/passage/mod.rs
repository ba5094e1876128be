//! Streaming passage lookup in a large keyed JSON corpus.
//!
//! Corpora are single JSON documents of the form
//!
//! ```json
//! {
//!   "metadata": { "title": "Holy Bible, King James Version" },
//!   "books": {
//!     "GEN": { "1:1": "In the beginning God created the heaven and the earth.", "1:2": "..." },
//!     "EXO": { "1:1": "..." }
//!   }
//! }
//! ```
//!
//! A full Bible is tens of megabytes, and a lookup needs a handful of
//! verses, so nothing is deserialized wholesale:
//!
//! - [`tokens::TokenReader`] pulls one JSON token at a time from a `BufRead`
//! - [`skip::skip_value`] consumes a value of any nesting depth without decoding it
//! - [`resolver::PassageResolver`] walks to the requested book, keeps the
//!   verses in range and stops reading once that book is closed
//!
//! ## Example
//!
//! ```rust,no_run
//! use manna::PassageResolver;
//!
//! let resolver = PassageResolver::new("bibles/eng-kjv/bible_kjv_nusj_minimal.json");
//! let passage = resolver.resolve(&"JHN 3:16".parse().unwrap()).unwrap();
//! println!("{passage}");
//! ```

pub mod resolver;
pub mod skip;
pub mod tokens;

use serde::Serialize;

use crate::core::reference::VerseRange;

/// Resolved verse texts for one verse range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passage {
    range: VerseRange,
    verses: Vec<String>,
}

impl Passage {
    #[must_use]
    pub fn new(range: VerseRange, verses: Vec<String>) -> Self {
        Self { range, verses }
    }

    #[must_use]
    pub fn range(&self) -> &VerseRange {
        &self.range
    }

    /// Verse texts in corpus order
    #[must_use]
    pub fn verses(&self) -> &[String] {
        &self.verses
    }

    /// The verses joined with single spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.verses.join(" ")
    }
}

impl std::fmt::Display for Passage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
