use super::*;
use tempfile::TempDir;

#[test]
fn test_load_descriptor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("000001_create_countries.yml");
    std::fs::write(
        &path,
        r#"
version: "000001"
csv_path: data/countries.csv
delimiter: ";"
pre: "SELECT 1"
post: ""
table_name: countries
columns:
  - name: id
    type: INTEGER
  - name: name
    type: VARCHAR(64)
"#,
    )
    .unwrap();

    let migration = DataMigration::load(&path).unwrap();
    assert_eq!(migration.version, "000001");
    assert_eq!(migration.version_number().unwrap(), 1);
    assert_eq!(migration.csv_path(), Path::new("data/countries.csv"));
    assert_eq!(migration.delimiter, ';');
    assert_eq!(migration.pre, "SELECT 1");
    assert_eq!(migration.table_name, "countries");
    assert_eq!(migration.column_names(), vec!["id", "name"]);
    assert_eq!(migration.columns[1].data_type, "VARCHAR(64)");
    assert_eq!(migration.source_path, path);
}

#[test]
fn test_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.yml");
    std::fs::write(&path, "version: \"000003\"\ntable_name: t\n").unwrap();

    let migration = DataMigration::load(&path).unwrap();
    assert_eq!(migration.delimiter, ',');
    assert!(migration.csv_path.is_empty());
    assert!(migration.pre.is_empty());
    assert!(migration.columns.is_empty());
}

#[test]
fn test_multi_character_delimiter_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.yml");
    std::fs::write(
        &path,
        "version: \"000001\"\ntable_name: t\ndelimiter: \"||\"\n",
    )
    .unwrap();

    let result = DataMigration::load(&path);
    assert!(matches!(result, Err(CoreError::InvalidDescriptor { .. })));
}

#[test]
fn test_missing_table_name_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.yml");
    std::fs::write(&path, "version: \"000001\"\n").unwrap();

    let result = DataMigration::load(&path);
    assert!(matches!(result, Err(CoreError::InvalidDescriptor { .. })));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("000002_create_currencies.yml");

    let mut migration = DataMigration::new(
        "000002",
        "currencies",
        vec![
            ColumnSchema::new("code", "VARCHAR(3)"),
            ColumnSchema::new("name", "TEXT"),
        ],
    );
    migration.csv_path = "currencies.csv".to_string();
    migration.save(&path).unwrap();

    let yaml = std::fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("table_name: currencies"));
    assert!(yaml.contains("type: VARCHAR(3)"));
    assert!(!yaml.contains("source_path"));

    let reloaded = DataMigration::load(&path).unwrap();
    assert_eq!(reloaded.version, "000002");
    assert_eq!(reloaded.columns, migration.columns);
    assert_eq!(reloaded.delimiter, ',');
}

#[test]
fn test_label() {
    let migration = DataMigration::new("000004", "t", vec![]);
    assert_eq!(migration.label(), "data migration 000004");
}
