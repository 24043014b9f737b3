//! Scaffold a data migration descriptor from a schema migration

use crate::error::{EngineError, EngineResult};
use dm_core::{
    discover_migrations, find_migration, pad_version, CoreError, DataMigration, MigrationDirection,
};
use dm_sql::{extract_table_schema_from_sql, SqlParser, TableSchema};
use std::path::{Path, PathBuf};

/// A descriptor written by [`create_descriptor`]
#[derive(Debug, Clone)]
pub struct Scaffold {
    /// File the descriptor was written to
    pub path: PathBuf,

    /// Schema extracted from the up migration
    pub schema: TableSchema,

    /// The descriptor as written
    pub descriptor: DataMigration,
}

/// Write `<data_dir>/<version>_<name>.yml` from the up migration `version`
///
/// The version is zero-padded to six digits. The descriptor gets the table
/// and columns of the migration's `CREATE TABLE` and an empty `csv_path` for
/// the operator to fill in. An existing descriptor is only replaced with
/// `force`.
pub fn create_descriptor(
    migrations_dir: &Path,
    data_dir: &Path,
    version: &str,
    parser: &SqlParser,
    force: bool,
) -> EngineResult<Scaffold> {
    let version = pad_version(version)?;
    let migrations = discover_migrations(migrations_dir)?;
    let migration = find_migration(&migrations, &version, MigrationDirection::Up).ok_or_else(
        || EngineError::MigrationNotFound {
            version: version.clone(),
            dir: migrations_dir.display().to_string(),
        },
    )?;

    let sql = migration.read_sql()?;
    let schema = extract_table_schema_from_sql(parser, &sql)?;
    log::info!(
        "Extracted {} columns for {} from {}",
        schema.columns.len(),
        schema.table_name,
        migration.path.display()
    );

    let path = data_dir.join(format!("{}.yml", migration.base_name()));
    if path.exists() && !force {
        return Err(EngineError::ScaffoldExists {
            path: path.display().to_string(),
        });
    }

    std::fs::create_dir_all(data_dir).map_err(|e| CoreError::IoWithPath {
        path: data_dir.display().to_string(),
        source: e,
    })?;

    let descriptor = DataMigration::new(
        version,
        schema.table_name.clone(),
        schema.columns.clone(),
    );
    descriptor.save(&path)?;
    log::debug!("Wrote data migration descriptor {}", path.display());

    Ok(Scaffold {
        path,
        schema,
        descriptor,
    })
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
