use super::*;
use crate::descriptor::ColumnSchema;
use std::io::Cursor;
use tempfile::TempDir;

fn parse(text: &str, delimiter: char) -> CsvDocument {
    CsvDocument::from_reader(Cursor::new(text), Path::new("test.csv"), delimiter).unwrap()
}

fn migration(columns: &[&str]) -> DataMigration {
    DataMigration::new(
        "000001",
        "t",
        columns
            .iter()
            .map(|c| ColumnSchema::new(*c, "VARCHAR"))
            .collect(),
    )
}

#[test]
fn test_header_and_rows() {
    let doc = parse("id,name\n1,Alice\n2,Bob\n", ',');
    assert_eq!(doc.header, vec!["id", "name"]);
    assert_eq!(doc.rows, vec![vec!["1", "Alice"], vec!["2", "Bob"]]);
    assert_eq!(doc.row_count(), 2);
    assert_eq!(doc.delimiter, ',');
}

#[test]
fn test_header_fields_trimmed_row_fields_verbatim() {
    let doc = parse(" id , name \n1, Alice \n", ',');
    assert_eq!(doc.header, vec!["id", "name"]);
    // Surrounding whitespace of the line is trimmed, inner field padding is kept
    assert_eq!(doc.rows, vec![vec!["1", " Alice"]]);
}

#[test]
fn test_blank_lines_skipped_everywhere() {
    let doc = parse("\n   \nid;name\n\n1;a\n  \n2;b\n\n", ';');
    assert_eq!(doc.header, vec!["id", "name"]);
    assert_eq!(doc.rows.len(), 2);
}

#[test]
fn test_crlf_line_endings() {
    let doc = parse("id,name\r\n1,a\r\n", ',');
    assert_eq!(doc.header, vec!["id", "name"]);
    assert_eq!(doc.rows, vec![vec!["1", "a"]]);
}

#[test]
fn test_empty_input() {
    let doc = parse("", ',');
    assert!(doc.header.is_empty());
    assert!(doc.rows.is_empty());

    let doc = parse("\n \n\t\n", ',');
    assert!(doc.header.is_empty());
    assert!(doc.rows.is_empty());
}

#[test]
fn test_no_quoting_support() {
    let doc = parse("id,name\n1,\"Smith, John\"\n", ',');
    assert_eq!(doc.rows[0], vec!["1", "\"Smith", " John\""]);
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::write(&path, "code\tlabel\nEUR\tEuro\n").unwrap();

    let doc = CsvDocument::load(&path, '\t').unwrap();
    assert_eq!(doc.path, path);
    assert_eq!(doc.header, vec!["code", "label"]);
    assert_eq!(doc.rows, vec![vec!["EUR", "Euro"]]);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = CsvDocument::load(&dir.path().join("missing.csv"), ',');
    assert!(matches!(result, Err(CoreError::IoWithPath { .. })));
}

#[test]
fn test_validate_exact_match() {
    let doc = parse("id,name,created_at\n", ',');
    assert!(validate_columns(&doc, &migration(&["id", "name", "created_at"])).is_ok());
}

#[test]
fn test_validate_permutation_fails() {
    let doc = parse("id,name\n1,a\n", ',');
    let result = validate_columns(&doc, &migration(&["name", "id"]));
    match result {
        Err(CoreError::ColumnMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, vec!["name", "id"]);
            assert_eq!(found, vec!["id", "name"]);
        }
        other => panic!("expected ColumnMismatch, got {:?}", other),
    }
}

#[test]
fn test_validate_subset_and_superset_fail() {
    let doc = parse("id,name\n", ',');
    assert!(validate_columns(&doc, &migration(&["id"])).is_err());
    assert!(validate_columns(&doc, &migration(&["id", "name", "extra"])).is_err());
}

#[test]
fn test_validate_empty_document() {
    let doc = parse("", ',');
    assert!(validate_columns(&doc, &migration(&[])).is_ok());
    assert!(matches!(
        validate_columns(&doc, &migration(&["id"])),
        Err(CoreError::ColumnMismatch { .. })
    ));
}
