//! Database trait definitions

use crate::error::DbResult;
use async_trait::async_trait;
use dm_core::{CsvDocument, VersionState};

/// Bulk loading of parsed CSV documents
#[async_trait]
pub trait DatabaseCsv: Send + Sync {
    /// Insert every row of `doc` into `table` in one transaction
    ///
    /// Values are bound positionally against the document's header. Any row
    /// failure rolls the whole load back. Returns the number of rows written.
    async fn bulk_load(&self, table: &str, doc: &CsvDocument) -> DbResult<usize>;

    /// Remove all rows from `table`, returns the number removed
    async fn truncate(&self, table: &str) -> DbResult<usize>;
}

/// The single-row data migration version table
#[async_trait]
pub trait DatabaseVersion: Send + Sync {
    /// Create the version table if it does not exist
    async fn ensure_version_table(&self) -> DbResult<()>;

    /// Current version state, `None` when the table is absent or empty
    async fn read_version(&self) -> DbResult<Option<VersionState>>;

    /// Replace the version row with `new` if the current row equals `expected`
    ///
    /// `expected == None` means "no row". Fails with
    /// [`DbError::VersionConflict`](crate::DbError::VersionConflict) when the
    /// row differs, leaving it untouched.
    async fn swap_version(&self, expected: Option<VersionState>, new: VersionState)
        -> DbResult<()>;

    /// Unconditionally replace the version row with a clean `version`
    async fn force_version(&self, version: u64) -> DbResult<()>;
}

/// Read access to the schema-migration tool's own version record
#[async_trait]
pub trait DatabaseSchemaVersion: Send + Sync {
    /// Version reported by the schema tool, `None` if it never ran
    async fn schema_version(&self) -> DbResult<Option<VersionState>>;
}

/// Everything the version engine needs from a database
pub trait Database: DatabaseCsv + DatabaseVersion + DatabaseSchemaVersion {}

impl<T> Database for T where T: DatabaseCsv + DatabaseVersion + DatabaseSchemaVersion {}
