//! dm-core - Core library for datamigrate
//!
//! This crate provides the shared types used across datamigrate: the schema
//! migration catalog, the data migration registry and descriptors, the CSV
//! pipeline, version helpers, and project configuration.

pub mod catalog;
pub mod config;
pub mod csv;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod version;

pub use catalog::{
    discover_migrations, find_migration, latest_migration, Migration, MigrationDirection,
};
pub use config::{Config, DatabaseConfig, Dialect};
pub use csv::{validate_columns, CsvDocument};
pub use descriptor::{ColumnSchema, DataMigration};
pub use error::{CoreError, CoreResult};
pub use registry::Registry;
pub use version::{pad_version, parse_version, VersionState};
