use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::reference::{VerseRange, VerseReference};
use crate::core::types::VerseId;

/// An identifier shared by more than one catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateId {
    pub id: VerseId,
    pub ranges: Vec<VerseRange>,
}

/// A verse range listed under more than one identifier
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateRange {
    pub range: VerseRange,
    pub ids: Vec<VerseId>,
}

/// Result of checking a catalog for duplicates
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    pub entries: usize,
    pub duplicate_ids: Vec<DuplicateId>,
    pub duplicate_ranges: Vec<DuplicateRange>,
}

impl CatalogReport {
    /// Duplicate identifiers break the picker's id -> entry mapping
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.duplicate_ids.is_empty()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty() && self.duplicate_ranges.is_empty()
    }
}

/// Find identifiers and verse ranges that appear more than once
#[must_use]
pub fn check_references(references: &[VerseReference]) -> CatalogReport {
    let mut by_id: BTreeMap<VerseId, Vec<VerseRange>> = BTreeMap::new();
    // Keyed on the display form so ranges come out in a stable order
    let mut by_range: BTreeMap<String, (VerseRange, Vec<VerseId>)> = BTreeMap::new();

    for reference in references {
        by_id
            .entry(reference.id)
            .or_default()
            .push(reference.range.clone());
        by_range
            .entry(reference.range.to_string())
            .or_insert_with(|| (reference.range.clone(), Vec::new()))
            .1
            .push(reference.id);
    }

    let duplicate_ids = by_id
        .into_iter()
        .filter(|(_, ranges)| ranges.len() > 1)
        .map(|(id, ranges)| DuplicateId { id, ranges })
        .collect();

    let duplicate_ranges = by_range
        .into_values()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(range, ids)| DuplicateRange { range, ids })
        .collect();

    CatalogReport {
        entries: references.len(),
        duplicate_ids,
        duplicate_ranges,
    }
}
