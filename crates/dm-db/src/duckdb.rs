//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{DatabaseCsv, DatabaseSchemaVersion, DatabaseVersion};
use async_trait::async_trait;
use dm_core::{CsvDocument, VersionState};
use duckdb::{params, params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const DEFAULT_VERSION_TABLE: &str = "schema_datamigrations";
const DEFAULT_SCHEMA_VERSION_TABLE: &str = "schema_migrations";

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    version_table: String,
    schema_version_table: String,
}

impl DuckDbBackend {
    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            version_table: DEFAULT_VERSION_TABLE.to_string(),
            schema_version_table: DEFAULT_SCHEMA_VERSION_TABLE.to_string(),
        }
    }

    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Use `table` for the data migration version row
    pub fn with_version_table(mut self, table: impl Into<String>) -> Self {
        self.version_table = table.into();
        self
    }

    /// Read the schema-migration tool's version from `table`
    pub fn with_schema_version_table(mut self, table: impl Into<String>) -> Self {
        self.schema_version_table = table.into();
        self
    }

    /// Name of the data migration version table
    pub fn version_table(&self) -> &str {
        &self.version_table
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn bulk_load_sync(&self, table: &str, doc: &CsvDocument) -> DbResult<usize> {
        if doc.header.is_empty() {
            log::debug!(
                "{} has no header, nothing to load into {}",
                doc.path.display(),
                table
            );
            return Ok(0);
        }

        let columns = doc
            .header
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; doc.header.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table, columns, placeholders
        );
        let load_error = |message: String| DbError::LoadError {
            table: table.to_string(),
            message,
        };

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql).map_err(|e| load_error(e.to_string()))?;
            for (idx, row) in doc.rows.iter().enumerate() {
                stmt.execute(params_from_iter(row.iter().map(String::as_str)))
                    .map_err(|e| load_error(format!("row {}: {}", idx + 1, e)))?;
            }
        }
        tx.commit().map_err(|e| load_error(e.to_string()))?;

        log::debug!("Inserted {} rows into {}", doc.rows.len(), table);
        Ok(doc.rows.len())
    }

    fn truncate_sync(&self, table: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(&format!("DELETE FROM {}", table), [])
            .map_err(|e| DbError::LoadError {
                table: table.to_string(),
                message: e.to_string(),
            })
    }

    fn ensure_version_table_sync(&self) -> DbResult<()> {
        let conn = self.lock()?;
        if let Some((schema, _)) = self.version_table.rsplit_once('.') {
            conn.execute(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema), [])?;
        }
        // No primary key: DuckDB rejects deleting and re-inserting the same
        // key within one transaction, which every swap of a dirty flag does.
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (version BIGINT NOT NULL, dirty BOOLEAN NOT NULL)",
                self.version_table
            ),
            [],
        )?;
        Ok(())
    }

    fn read_state_sync(&self, table: &str) -> DbResult<Option<VersionState>> {
        let conn = self.lock()?;
        if !relation_exists_on(&conn, table)? {
            return Ok(None);
        }
        read_state(&conn, table)
    }

    fn swap_version_sync(&self, expected: Option<VersionState>, new: VersionState) -> DbResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let current = read_state(&tx, &self.version_table)?;
        if current != expected {
            return Err(DbError::VersionConflict {
                expected: describe(expected),
                found: describe(current),
            });
        }

        replace_state(&tx, &self.version_table, new)?;
        tx.commit()?;
        log::debug!(
            "Version in {} moved from {} to {}",
            self.version_table,
            describe(expected),
            new
        );
        Ok(())
    }

    fn force_version_sync(&self, version: u64) -> DbResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        replace_state(&tx, &self.version_table, VersionState::clean(version))?;
        tx.commit()?;
        Ok(())
    }
}

fn relation_exists_on(conn: &Connection, name: &str) -> DbResult<bool> {
    // Handle schema-qualified names
    let (schema, table) = name.rsplit_once('.').unwrap_or(("main", name));

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            params![schema, table],
            |row| row.get(0),
        )
        .map_err(|e| DbError::ExecutionError(e.to_string()))?;

    Ok(count > 0)
}

fn read_state(conn: &Connection, table: &str) -> DbResult<Option<VersionState>> {
    let sql = format!(
        "SELECT version, dirty FROM {} ORDER BY version DESC LIMIT 1",
        table
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };

    let version: i64 = row.get(0)?;
    let dirty: bool = row.get(1)?;
    let version = u64::try_from(version)
        .map_err(|_| DbError::Internal(format!("negative version {} in {}", version, table)))?;
    Ok(Some(VersionState { version, dirty }))
}

fn replace_state(conn: &Connection, table: &str, state: VersionState) -> DbResult<()> {
    let version = i64::try_from(state.version)
        .map_err(|_| DbError::Internal(format!("version {} out of range", state.version)))?;
    conn.execute(&format!("DELETE FROM {}", table), [])?;
    conn.execute(
        &format!("INSERT INTO {} (version, dirty) VALUES (?, ?)", table),
        params![version, state.dirty],
    )?;
    Ok(())
}

fn describe(state: Option<VersionState>) -> String {
    match state {
        Some(state) => state.to_string(),
        None => "no version".to_string(),
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[async_trait]
impl DatabaseCsv for DuckDbBackend {
    async fn bulk_load(&self, table: &str, doc: &CsvDocument) -> DbResult<usize> {
        self.bulk_load_sync(table, doc)
    }

    async fn truncate(&self, table: &str) -> DbResult<usize> {
        self.truncate_sync(table)
    }
}

#[async_trait]
impl DatabaseVersion for DuckDbBackend {
    async fn ensure_version_table(&self) -> DbResult<()> {
        self.ensure_version_table_sync()
    }

    async fn read_version(&self) -> DbResult<Option<VersionState>> {
        self.read_state_sync(&self.version_table)
    }

    async fn swap_version(
        &self,
        expected: Option<VersionState>,
        new: VersionState,
    ) -> DbResult<()> {
        self.swap_version_sync(expected, new)
    }

    async fn force_version(&self, version: u64) -> DbResult<()> {
        self.force_version_sync(version)
    }
}

#[async_trait]
impl DatabaseSchemaVersion for DuckDbBackend {
    async fn schema_version(&self) -> DbResult<Option<VersionState>> {
        self.read_state_sync(&self.schema_version_table)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
