use std::path::Path;
use tracing::warn;

use crate::catalog::store::CatalogError;
use crate::core::book;
use crate::core::reference::{VerseRange, VerseReference};

/// Parse a catalog CSV file with columns: id, book, chapter, verse
///
/// # Errors
///
/// Returns `CatalogError::ReadError` if the file cannot be read, or
/// `CatalogError::InvalidCsv` if the content is invalid.
pub fn parse_catalog_csv_file(path: &Path) -> Result<Vec<VerseReference>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog_csv_text(&content)
}

/// Parse catalog CSV text with columns: id, book, chapter, verse
///
/// The book column holds an English name (`1 Corinthians`, `Psalm`) or a
/// book code. The verse column is either `N` or `N-M`. Blank lines, `#`
/// comments and an `id,book,...` header are skipped; rows with fewer than
/// four fields are skipped with a warning.
///
/// # Errors
///
/// Returns `CatalogError::InvalidCsv` naming the line for unknown books,
/// non-numeric fields or invalid verse ranges.
pub fn parse_catalog_csv_text(text: &str) -> Result<Vec<VerseReference>, CatalogError> {
    let mut references = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(',')
            .map(|f| f.trim().trim_matches('"').trim())
            .collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        if fields[0].eq_ignore_ascii_case("id")
            && fields.get(1).is_some_and(|f| f.eq_ignore_ascii_case("book"))
        {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 4 {
            warn!("Skipping malformed catalog row on line {line_num}: {line}");
            continue;
        }

        let number = |field: &str, what: &str| -> Result<u32, CatalogError> {
            field.parse().map_err(|_| {
                CatalogError::InvalidCsv(format!("Invalid {what} on line {line_num}: '{field}'"))
            })
        };

        let id = number(fields[0], "id")?;
        let code = book::resolve_book(fields[1]).ok_or_else(|| {
            CatalogError::InvalidCsv(format!(
                "Unknown book name on line {line_num}: '{}'",
                fields[1]
            ))
        })?;
        let chapter = number(fields[2], "chapter")?;
        let (verse_start, verse_end) = match fields[3].split_once('-') {
            Some((start, end)) => (number(start.trim(), "verse")?, number(end.trim(), "verse")?),
            None => {
                let verse = number(fields[3], "verse")?;
                (verse, verse)
            }
        };

        let range = VerseRange::new(code, chapter, verse_start, verse_end)
            .map_err(|e| CatalogError::InvalidCsv(format!("Line {line_num}: {e}")))?;
        references.push(VerseReference::new(id, range));
    }

    if references.is_empty() {
        return Err(CatalogError::InvalidCsv(
            "No verse references found in file".to_string(),
        ));
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VerseId;

    #[test]
    fn test_parse_catalog_csv_text() {
        let csv = r"id,book,chapter,verse
1,John,3,16
2,Psalm,23,1-6
3,1 Corinthians,13,4-7
";

        let refs = parse_catalog_csv_text(csv).unwrap();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].id, VerseId::new(1));
        assert_eq!(refs[0].range.to_string(), "JHN 3:16");
        assert_eq!(refs[1].range.to_string(), "PSA 23:1-6");
        assert_eq!(refs[2].range.book_code.as_str(), "1CO");
    }

    #[test]
    fn test_parse_catalog_csv_accepts_codes_and_blank_lines() {
        let csv = "\n1,GEN,1,1\n\n,,,\n2,rev,21,4\n";
        let refs = parse_catalog_csv_text(csv).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].range.book_code.as_str(), "REV");
    }

    #[test]
    fn test_parse_catalog_csv_skips_short_rows() {
        let csv = "1,John,3\n2,John,3,16\n";
        let refs = parse_catalog_csv_text(csv).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id, VerseId::new(2));
    }

    #[test]
    fn test_parse_catalog_csv_unknown_book() {
        let err = parse_catalog_csv_text("1,Tobit,1,1\n").unwrap_err();
        match err {
            CatalogError::InvalidCsv(msg) => {
                assert!(msg.contains("line 1"));
                assert!(msg.contains("Tobit"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_catalog_csv_invalid_numbers() {
        assert!(matches!(
            parse_catalog_csv_text("x,John,3,16\n"),
            Err(CatalogError::InvalidCsv(_))
        ));
        assert!(matches!(
            parse_catalog_csv_text("1,John,3,16-a\n"),
            Err(CatalogError::InvalidCsv(_))
        ));
        assert!(matches!(
            parse_catalog_csv_text("1,John,3,9-2\n"),
            Err(CatalogError::InvalidCsv(_))
        ));
    }

    #[test]
    fn test_parse_catalog_csv_empty() {
        assert!(matches!(
            parse_catalog_csv_text("id,book,chapter,verse\n"),
            Err(CatalogError::InvalidCsv(_))
        ));
    }
}
