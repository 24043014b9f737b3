//! Error types for dm-migrate

use dm_core::CoreError;
use dm_db::DbError;
use dm_sql::SqlError;
use thiserror::Error;

/// Version engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Schema tool left a dirty version (M001)
    #[error("[M001] Schema migrations are dirty at version {version}, fix the schema state to continue")]
    DirtySchema { version: u64 },

    /// A previous data run stopped between loading and recording (M002)
    #[error(
        "[M002] Data migrations are dirty at version {version}, check the loaded data and run `force` to continue"
    )]
    DirtyData { version: u64 },

    /// Schema tool has never recorded a version (M003)
    #[error("[M003] No schema migration version found, apply the schema migrations first")]
    NoSchemaVersion,

    /// Registry returned a version it has no descriptor for (M004)
    #[error("[M004] No data migration descriptor for version {0}")]
    MissingDescriptor(u64),

    /// No up migration for the requested version (M005)
    #[error("[M005] No up migration for version {version} in {dir}")]
    MigrationNotFound { version: String, dir: String },

    /// Descriptor file already exists (M006)
    #[error("[M006] Data migration already exists: {path} (use --force to overwrite)")]
    ScaffoldExists { path: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
