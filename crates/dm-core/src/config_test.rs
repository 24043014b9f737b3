use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.dialect, Dialect::DuckDb);
    assert_eq!(config.version_table, "schema_datamigrations");
    assert_eq!(config.schema_version_table, "schema_migrations");

    let root = PathBuf::from("/tmp/project");
    assert_eq!(
        config.migrations_dir_absolute(&root),
        root.join("migrations")
    );
    assert_eq!(
        config.data_migrations_dir_absolute(&root),
        root.join("datamigrations")
    );
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database:
  path: "./warehouse.duckdb"
migrations_dir: db/migrations
data_migrations_dir: db/data
dialect: postgres
version_table: meta.data_version
schema_version_table: meta.schema_version
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.database.path, "./warehouse.duckdb");
    assert_eq!(config.migrations_dir, "db/migrations");
    assert_eq!(config.data_migrations_dir, "db/data");
    assert_eq!(config.dialect, Dialect::Postgres);
    assert_eq!(config.dialect.as_str(), "postgres");
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("migration_dir: typo\n");
    assert!(result.is_err());
}

#[test]
fn test_load_from_dir_defaults_when_missing() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "migrations");
}

#[test]
fn test_load_from_dir_reads_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "database:\n  path: data.duckdb\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.database.path, "data.duckdb");
}

#[test]
fn test_load_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(&dir.path().join("custom.yml"));
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));
}

#[test]
fn test_invalid_table_names_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    for bad in ["\"drop table\"", "a.b.c", "1abc", "'x;--'"] {
        std::fs::write(&path, format!("version_table: {}\n", bad)).unwrap();
        let result = Config::load(&path);
        assert!(
            matches!(result, Err(CoreError::ConfigInvalid { .. })),
            "expected {} to be rejected",
            bad
        );
    }
}

#[test]
fn test_same_tables_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "version_table: versions\nschema_version_table: versions\n",
    )
    .unwrap();
    assert!(matches!(
        Config::load(&path),
        Err(CoreError::ConfigInvalid { .. })
    ));
}
