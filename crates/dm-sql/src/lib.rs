//! dm-sql - SQL parsing layer for datamigrate
//!
//! This crate parses schema migrations with sqlparser-rs in the configured
//! dialect and derives the ordered column schema of a table from its
//! `CREATE TABLE` statement.

pub mod ddl;
pub mod error;
pub mod parser;

pub use ddl::{extract_table_schema, extract_table_schema_from_sql, TableSchema};
pub use error::SqlError;
pub use parser::SqlParser;
