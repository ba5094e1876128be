use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::reference::{ReferenceError, VerseReference};
use crate::core::types::VerseId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog entry {id}: {source}")]
    InvalidEntry {
        id: VerseId,
        #[source]
        source: ReferenceError,
    },

    #[error("Invalid catalog CSV: {0}")]
    InvalidCsv(String),
}

/// The verse-of-the-day catalog with an identifier index
#[derive(Debug, Clone)]
pub struct VotdCatalog {
    /// All entries in file order
    pub references: Vec<VerseReference>,

    /// Index: verse ID -> index in references vec
    id_to_index: HashMap<VerseId, usize>,
}

impl VotdCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            references: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the embedded JSON is invalid (checked by build.rs).
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/votd.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadError` if the file cannot be read, or a
    /// parse/validation error for malformed content.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!(
            "Loaded {} verse references from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse catalog from a JSON array of verse references
    ///
    /// Identifier uniqueness is a precondition and is not enforced here; see
    /// [`crate::catalog::check`] for the offline duplicate check.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` for malformed JSON or
    /// `CatalogError::InvalidEntry` for a zero or reversed verse range.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let references: Vec<VerseReference> = serde_json::from_str(json)?;
        Self::from_references(references)
    }

    /// Build a catalog from already-parsed entries
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidEntry` for a zero or reversed verse range.
    pub fn from_references(references: Vec<VerseReference>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for reference in references {
            reference
                .range
                .validate()
                .map_err(|source| CatalogError::InvalidEntry {
                    id: reference.id,
                    source,
                })?;
            catalog.add_reference(reference);
        }
        Ok(catalog)
    }

    /// Add a reference to the catalog
    pub fn add_reference(&mut self, reference: VerseReference) {
        let index = self.references.len();
        self.id_to_index.insert(reference.id, index);
        self.references.push(reference);
    }

    /// Get a reference by ID
    #[must_use]
    pub fn get(&self, id: VerseId) -> Option<&VerseReference> {
        self.id_to_index.get(&id).map(|&idx| &self.references[idx])
    }

    /// Whether an identifier exists in the catalog
    #[must_use]
    pub fn contains(&self, id: VerseId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Every identifier in file order
    #[must_use]
    pub fn ids(&self) -> Vec<VerseId> {
        self.references.iter().map(|r| r.id).collect()
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.references)?)
    }

    /// Number of references in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

impl Default for VotdCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::VerseRange;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = VotdCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = VotdCatalog::load_embedded().unwrap();

        let first = catalog.get(VerseId::new(1));
        assert!(first.is_some());
        assert_eq!(first.unwrap().range.to_string(), "JHN 3:16");
    }

    #[test]
    fn test_catalog_get_nonexistent() {
        let catalog = VotdCatalog::load_embedded().unwrap();
        assert!(catalog.get(VerseId::new(999_999)).is_none());
        assert!(!catalog.contains(VerseId::new(999_999)));
    }

    #[test]
    fn test_catalog_to_json_round_trips() {
        let catalog = VotdCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();
        let reloaded = VotdCatalog::from_json(&json).unwrap();

        assert!(json.contains("\"book_code\""));
        assert_eq!(reloaded.ids(), catalog.ids());
    }

    #[test]
    fn test_from_json_rejects_reversed_range() {
        let json = r#"[{"id":4,"book_code":"GEN","chapter":1,"verse_start":3,"verse_end":1}]"#;
        let err = VotdCatalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidEntry { id, .. } if id == VerseId::new(4)
        ));
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let err = VotdCatalog::from_json(r#"{"references": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::ParseError(_)));
    }

    #[test]
    fn test_from_json_rejects_id_above_u32() {
        let json = r#"[{"id": 4294967296, "book_code": "GEN", "chapter": 1, "verse_start": 1, "verse_end": 1}]"#;
        assert!(matches!(
            VotdCatalog::from_json(json),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = VotdCatalog::load_from_file(Path::new("/nonexistent/votd.json")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadError(_)));
    }

    #[test]
    fn test_add_reference() {
        let mut catalog = VotdCatalog::new();
        assert_eq!(catalog.len(), 0);

        catalog.add_reference(VerseReference::new(
            42,
            VerseRange::new("PSA", 23, 1, 6).unwrap(),
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.ids(), vec![VerseId::new(42)]);

        let retrieved = catalog.get(VerseId::new(42));
        assert_eq!(retrieved.unwrap().range.label(), "Psalms 23:1-6");
    }
}
