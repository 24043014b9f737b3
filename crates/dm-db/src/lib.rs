//! dm-db - Database layer for datamigrate
//!
//! This crate provides the database traits the version engine runs against
//! and their DuckDB implementation: transactional bulk loading, truncation,
//! the single-row data migration version table, and read access to the
//! schema-migration tool's version table.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, DatabaseCsv, DatabaseSchemaVersion, DatabaseVersion};
