//! Error types for dm-core

use thiserror::Error;

/// Core error type for datamigrate
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Directory not found
    #[error("[E003] Directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// E004: Schema migration file name does not follow the naming convention
    #[error("[E004] Migration file {path} does not match the expected pattern <version>_<name>.<up|down>.sql")]
    InvalidMigrationName { path: String },

    /// E005: Version string is not numeric
    #[error("[E005] Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// E006: Two data migrations share a version
    #[error("[E006] Duplicate data migration version {version}")]
    DuplicateVersion { version: u64 },

    /// E007: Data migration descriptor could not be decoded
    #[error("[E007] Failed to parse data migration {path}: {details}")]
    InvalidDescriptor { path: String, details: String },

    /// E008: CSV referenced by a descriptor does not exist
    #[error("[E008] The csv file '{csv_path}' referenced by {descriptor} does not exist")]
    CsvNotFound { csv_path: String, descriptor: String },

    /// E009: CSV header does not match the descriptor's columns
    #[error("[E009] CSV columns in {path} do not match the data migration. CSV columns: {found:?}, migration columns: {expected:?}")]
    ColumnMismatch {
        path: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// E010: IO error
    #[error("[E010] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E011: IO error with file path context
    #[error("[E011] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E012: YAML parse or serialization error
    #[error("[E012] YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
