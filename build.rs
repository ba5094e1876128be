use std::collections::HashSet;
use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/votd.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    let entries = catalog.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Root must be a JSON array of verse references\n\
             Got: {catalog}\n"
        );
    });

    assert!(
        !entries.is_empty(),
        "\n\nCATALOG BUILD ERROR: Catalog is empty\n\
         The embedded catalog must contain at least one verse reference.\n"
    );

    let mut seen_ids = HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        let id = validate_entry_fields(entry, i);
        assert!(
            seen_ids.insert(id),
            "\n\nCATALOG BUILD ERROR: Duplicate id {id} (index {i})\n\
             Verse ids must be unique across the catalog.\n"
        );
    }

    println!(
        "cargo:warning=Validated catalog: {} verse references",
        entries.len()
    );
}

fn validate_entry_fields(entry: &serde_json::Value, index: usize) -> u64 {
    let id = entry
        .get("id")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Entry at index {index} missing numeric 'id' field\n")
        });

    assert!(
        u32::try_from(id).is_ok(),
        "\n\nCATALOG BUILD ERROR: Entry at index {index} has id {id} above {}\n",
        u32::MAX
    );

    assert!(
        entry.get("book_code").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Entry {id} (index {index}) missing 'book_code' field\n"
    );

    let number = |field: &str| {
        entry
            .get(field)
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Entry {id} (index {index}) missing numeric '{field}' field\n"
                )
            })
    };

    let chapter = number("chapter");
    let verse_start = number("verse_start");
    let verse_end = number("verse_end");

    for (field, value) in [
        ("chapter", chapter),
        ("verse_start", verse_start),
        ("verse_end", verse_end),
    ] {
        assert!(
            u32::try_from(value).is_ok(),
            "\n\nCATALOG BUILD ERROR: Entry {id} has {field} {value} above {}\n",
            u32::MAX
        );
    }

    assert!(
        chapter > 0 && verse_start > 0,
        "\n\nCATALOG BUILD ERROR: Entry {id} has a zero chapter or verse\n\
         Chapters and verses are numbered from 1.\n"
    );
    assert!(
        verse_start <= verse_end,
        "\n\nCATALOG BUILD ERROR: Entry {id} has verse_start {verse_start} after verse_end {verse_end}\n"
    );

    id
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/votd.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
