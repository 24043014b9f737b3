//! Up/down transitions of the data migration cursor
//!
//! Every run first checks the schema tool's version, then walks the registry
//! in version order. Each step is committed on its own: a failure halts the
//! run but leaves earlier steps applied.
//!
//! The cursor is only ever moved with a compare-and-swap against the value
//! read at the start of the run. An up step marks the cursor dirty before
//! loading and clears it once the rows are committed, so a process that dies
//! in between leaves a dirty cursor instead of a silent gap.

use crate::error::{EngineError, EngineResult};
use dm_core::{
    validate_columns, CsvDocument, DataMigration, MigrationDirection, Registry, VersionState,
};
use dm_db::Database;

/// Called after each step with the step, the steps done so far and the
/// total planned for the run
pub type ProgressFn<'a> = Box<dyn Fn(&StepReport, usize, usize) + Send + Sync + 'a>;

/// Outcome of one applied or reverted version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Data migration version
    pub version: u64,

    /// Table that was loaded or truncated
    pub table: String,

    /// Rows inserted (up) or removed (down)
    pub rows: usize,
}

/// Outcome of an up or down run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Direction of the run
    pub direction: MigrationDirection,

    /// Cursor before the run
    pub from: u64,

    /// Cursor after the run
    pub to: u64,

    /// Steps in the order they were applied
    pub steps: Vec<StepReport>,
}

impl MigrationReport {
    fn unchanged(direction: MigrationDirection, version: u64) -> Self {
        Self {
            direction,
            from: version,
            to: version,
            steps: Vec::new(),
        }
    }

    /// Whether the run left the database untouched
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty() && self.from == self.to
    }

    /// Rows inserted or removed across all steps
    pub fn total_rows(&self) -> usize {
        self.steps.iter().map(|s| s.rows).sum()
    }
}

/// Snapshot of both cursors and the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Data migration cursor, `None` before the first run
    pub data: Option<VersionState>,

    /// Schema tool's cursor, `None` if it never ran
    pub schema: Option<VersionState>,

    /// Greatest descriptor version known on disk
    pub latest: Option<u64>,
}

/// Version engine over a database and a loaded registry
pub struct Migrator<'a> {
    db: &'a dyn Database,
    registry: &'a Registry,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> Migrator<'a> {
    /// Create a new migrator
    pub fn new(db: &'a dyn Database, registry: &'a Registry) -> Self {
        Self {
            db,
            registry,
            progress: None,
        }
    }

    /// Report each finished step to `progress`
    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Load every descriptor above the current cursor, in ascending order
    pub async fn up(&self) -> EngineResult<MigrationReport> {
        let schema = self.check_schema().await?;
        self.db.ensure_version_table().await?;
        let state = self.db.read_version().await?;
        let current = clean_version(state)?;

        let versions = self.registry.sorted_versions()?;
        let target = versions.last().copied().unwrap_or(0);
        if current == target {
            log::info!("Data migrations already at version {}", current);
            return Ok(MigrationReport::unchanged(MigrationDirection::Up, current));
        }
        if current > target {
            log::warn!(
                "Data migration version {} is ahead of the latest descriptor {}",
                current,
                target
            );
            return Ok(MigrationReport::unchanged(MigrationDirection::Up, current));
        }

        let total = versions.iter().filter(|v| **v > current).count();
        let mut report = MigrationReport::unchanged(MigrationDirection::Up, current);
        let mut expected = state;

        for version in versions {
            if version <= report.to {
                log::debug!("Skipping data migration {}, already applied", version);
                continue;
            }
            if version > schema.version {
                log::warn!(
                    "Data migration {} is newer than schema version {}",
                    version,
                    schema.version
                );
            }

            let migration = self.descriptor(version)?;
            let step = self.load_step(migration, version, expected).await?;
            expected = Some(VersionState::clean(version));
            report.to = version;
            self.record(&mut report, step, total);
        }

        log::info!(
            "Data migrations moved up from {} to {}",
            report.from,
            report.to
        );
        Ok(report)
    }

    /// Truncate every descriptor's table in descending order, ending at 0
    ///
    /// The walk covers the whole registry, not only the versions at or below
    /// the cursor.
    pub async fn down(&self) -> EngineResult<MigrationReport> {
        self.check_schema().await?;
        self.db.ensure_version_table().await?;
        let state = self.db.read_version().await?;
        let current = clean_version(state)?;

        if current == 0 {
            log::info!("No data migrations applied, nothing to revert");
            return Ok(MigrationReport::unchanged(MigrationDirection::Down, 0));
        }

        let versions = self.registry.sorted_versions()?;
        let total = versions.len();
        let mut report = MigrationReport::unchanged(MigrationDirection::Down, current);
        let mut expected = state;

        for version in versions.into_iter().rev() {
            let migration = self.descriptor(version)?;
            log::info!(
                "Reverting data migration {} from {}",
                version,
                migration.table_name
            );
            let rows = self.db.truncate(&migration.table_name).await?;

            let next = VersionState::clean(version);
            self.db.swap_version(expected, next).await?;
            expected = Some(next);
            report.to = version;

            let step = StepReport {
                version,
                table: migration.table_name.clone(),
                rows,
            };
            self.record(&mut report, step, total);
        }

        self.db
            .swap_version(expected, VersionState::clean(0))
            .await?;
        report.to = 0;

        log::info!("Data migrations moved down from {} to 0", report.from);
        Ok(report)
    }

    /// Overwrite the cursor with a clean `version`, returning the old state
    pub async fn force(&self, version: u64) -> EngineResult<Option<VersionState>> {
        self.db.ensure_version_table().await?;
        let previous = self.db.read_version().await?;
        self.db.force_version(version).await?;
        log::info!(
            "Data migration version forced to {} (was {})",
            version,
            previous.map_or_else(|| "unset".to_string(), |s| s.to_string())
        );
        Ok(previous)
    }

    /// Current cursors without modifying anything
    pub async fn status(&self) -> EngineResult<Status> {
        Ok(Status {
            data: self.db.read_version().await?,
            schema: self.db.schema_version().await?,
            latest: self.registry.latest_version()?,
        })
    }

    async fn check_schema(&self) -> EngineResult<VersionState> {
        match self.db.schema_version().await? {
            None => Err(EngineError::NoSchemaVersion),
            Some(state) if state.dirty => Err(EngineError::DirtySchema {
                version: state.version,
            }),
            Some(state) => {
                log::debug!("Schema migrations at version {}", state.version);
                Ok(state)
            }
        }
    }

    fn descriptor(&self, version: u64) -> EngineResult<&'a DataMigration> {
        self.registry
            .by_version(version)
            .ok_or(EngineError::MissingDescriptor(version))
    }

    /// Validate and load one descriptor, moving the cursor from `expected`
    /// to `version`
    async fn load_step(
        &self,
        migration: &DataMigration,
        version: u64,
        expected: Option<VersionState>,
    ) -> EngineResult<StepReport> {
        log::info!(
            "Applying data migration {} to {}",
            version,
            migration.table_name
        );
        let doc = CsvDocument::load(migration.csv_path(), migration.delimiter)?;
        validate_columns(&doc, migration)?;
        log::debug!(
            "{} rows validated against {} columns",
            doc.row_count(),
            migration.columns.len()
        );

        let from = expected.map_or(0, |s| s.version);
        let marked = VersionState::dirty(from);
        self.db.swap_version(expected, marked).await?;

        let rows = match self.db.bulk_load(&migration.table_name, &doc).await {
            Ok(rows) => rows,
            Err(err) => {
                // The load rolled back, so the old cursor is accurate again
                if let Err(restore) = self
                    .db
                    .swap_version(Some(marked), VersionState::clean(from))
                    .await
                {
                    log::warn!("Failed to clear dirty flag at {}: {}", from, restore);
                }
                return Err(err.into());
            }
        };

        self.db
            .swap_version(Some(marked), VersionState::clean(version))
            .await?;

        Ok(StepReport {
            version,
            table: migration.table_name.clone(),
            rows,
        })
    }

    fn record(&self, report: &mut MigrationReport, step: StepReport, total: usize) {
        log::debug!(
            "Data migration {} done, {} rows in {}",
            step.version,
            step.rows,
            step.table
        );
        report.steps.push(step);
        if let (Some(progress), Some(step)) = (&self.progress, report.steps.last()) {
            progress(step, report.steps.len(), total);
        }
    }
}

/// Current cursor value, refusing a dirty one
fn clean_version(state: Option<VersionState>) -> EngineResult<u64> {
    match state {
        Some(state) if state.dirty => Err(EngineError::DirtyData {
            version: state.version,
        }),
        Some(state) => Ok(state.version),
        None => Ok(0),
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
