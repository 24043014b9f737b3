use super::*;

fn extract(sql: &str) -> SqlResult<TableSchema> {
    extract_table_schema_from_sql(&SqlParser::duckdb(), sql)
}

#[test]
fn test_extract_simple_table() {
    let schema = extract(
        "CREATE TABLE countries (id INTEGER, name VARCHAR(255), created_at TIMESTAMP);",
    )
    .unwrap();

    assert_eq!(schema.table_name, "countries");
    assert_eq!(schema.column_names(), vec!["id", "name", "created_at"]);
    assert_eq!(schema.columns[0].data_type, "INTEGER");
    assert_eq!(schema.columns[1].data_type, "VARCHAR(255)");
    assert_eq!(schema.columns[2].data_type, "TIMESTAMP");
}

#[test]
fn test_extract_preserves_declaration_order() {
    let schema = extract("CREATE TABLE t (zeta INT, alpha INT, mid INT)").unwrap();
    assert_eq!(schema.column_names(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_duplicate_columns_keep_first_definition() {
    let schema = extract("CREATE TABLE t (id INTEGER, name TEXT, id BIGINT)").unwrap();
    assert_eq!(schema.column_names(), vec!["id", "name"]);
    assert_eq!(schema.columns[0].data_type, "INTEGER");
}

#[test]
fn test_schema_qualified_table_name() {
    let schema = extract("CREATE TABLE reference.currencies (code VARCHAR(3))").unwrap();
    assert_eq!(schema.table_name, "reference.currencies");
}

#[test]
fn test_quoted_column_names_are_unquoted() {
    let schema = extract(r#"CREATE TABLE t ("order" INTEGER, "Group Name" TEXT)"#).unwrap();
    assert_eq!(schema.column_names(), vec!["order", "Group Name"]);
}

#[test]
fn test_constraints_do_not_become_columns() {
    let schema = extract(
        "CREATE TABLE users (
            id INTEGER NOT NULL,
            email TEXT UNIQUE,
            PRIMARY KEY (id)
        )",
    )
    .unwrap();
    assert_eq!(schema.column_names(), vec!["id", "email"]);
}

#[test]
fn test_postgres_migration_file() {
    let sql = r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            email TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT now()
        );
        CREATE INDEX idx_users_email ON users (email);
    "#;
    let schema = extract_table_schema_from_sql(&SqlParser::postgres(), sql).unwrap();
    assert_eq!(schema.table_name, "users");
    assert_eq!(schema.column_names(), vec!["id", "email", "created_at"]);
    assert_eq!(schema.columns[0].data_type, "SERIAL");
}

#[test]
fn test_first_table_wins() {
    let schema = extract("CREATE TABLE a (x INT); CREATE TABLE b (y INT, z INT);").unwrap();
    assert_eq!(schema.table_name, "a");
    assert_eq!(schema.column_names(), vec!["x"]);
}

#[test]
fn test_round_trip_through_create_table_sql() {
    let parser = SqlParser::duckdb();
    let original =
        extract("CREATE TABLE events (id INTEGER, name VARCHAR, created_at TIMESTAMP)").unwrap();

    let rendered = original.to_create_table_sql(&parser);
    let reparsed = extract_table_schema_from_sql(&parser, &rendered).unwrap();

    assert_eq!(reparsed, original);
    assert_eq!(reparsed.column_names(), vec!["id", "name", "created_at"]);
}

#[test]
fn test_non_create_table_is_schema_error() {
    let result = extract("SELECT 1");
    assert!(matches!(result, Err(SqlError::NoTableDefinition(_))));

    let result = extract("DROP TABLE users");
    assert!(matches!(result, Err(SqlError::NoTableDefinition(_))));
}

#[test]
fn test_invalid_sql_is_parse_error() {
    let result = extract("CREATE TABLE users (id INTEGER,, name TEXT)");
    assert!(matches!(result, Err(SqlError::ParseError { .. })));
}

#[test]
fn test_empty_sql() {
    assert!(matches!(extract(""), Err(SqlError::EmptySql)));
}

#[test]
fn test_display_lists_columns() {
    let schema = extract("CREATE TABLE t (id INTEGER, name TEXT)").unwrap();
    let text = schema.to_string();
    assert!(text.starts_with("table: t\n"));
    assert!(text.contains("    id INTEGER\n"));
    assert!(text.contains("    name TEXT\n"));
}
