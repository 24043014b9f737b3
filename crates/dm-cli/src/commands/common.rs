//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use dm_core::{discover_migrations, latest_migration, Config, MigrationDirection, Registry};
use dm_db::DuckDbBackend;
use dm_migrate::{MigrationReport, ProgressFn, StepReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

const MEMORY_DB: &str = ":memory:";

/// Configuration merged from flags, environment and `datamigrate.yml`
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Loaded project configuration
    pub config: Config,

    /// Database path to open
    pub db_path: String,

    /// Schema migrations directory
    pub migrations_dir: PathBuf,

    /// Data migration descriptors directory
    pub data_migrations_dir: PathBuf,
}

impl Settings {
    /// Resolve settings for a command
    ///
    /// Flags (and `DB_URL`, which clap folds into `--db-url`) win over the
    /// config file. Paths from the config file resolve against the project
    /// directory, paths from flags are used as given.
    pub(crate) fn load(global: &GlobalArgs) -> Result<Self> {
        let root = Path::new(&global.project_dir);
        let config = match &global.config {
            Some(path) => {
                Config::load(Path::new(path)).context("Failed to load configuration file")?
            }
            None => Config::load_from_dir(root).context("Failed to load project configuration")?,
        };

        let db_path = match &global.db_url {
            Some(url) => url.clone(),
            None => resolve_db_path(root, &config.database.path),
        };
        let migrations_dir = global
            .migrations_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.migrations_dir_absolute(root));
        let data_migrations_dir = global
            .datamigrations_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.data_migrations_dir_absolute(root));

        log::debug!(
            "Using database {}, migrations in {}, data migrations in {}",
            db_path,
            migrations_dir.display(),
            data_migrations_dir.display()
        );

        Ok(Self {
            config,
            db_path,
            migrations_dir,
            data_migrations_dir,
        })
    }

    /// Open the configured database with the configured version tables
    pub(crate) fn open_database(&self) -> Result<DuckDbBackend> {
        let db = DuckDbBackend::new(&self.db_path)
            .with_context(|| format!("Failed to connect to database {}", self.db_path))?;
        Ok(db
            .with_version_table(self.config.version_table.clone())
            .with_schema_version_table(self.config.schema_version_table.clone()))
    }

    /// Load every data migration descriptor
    pub(crate) fn load_registry(&self) -> Result<Registry> {
        let registry = Registry::load(&self.data_migrations_dir).with_context(|| {
            format!(
                "Failed to load data migrations from {}",
                self.data_migrations_dir.display()
            )
        })?;
        log::info!("Found {} data migrations", registry.len());
        Ok(registry)
    }

    /// Check descriptors against the schema migration catalog
    ///
    /// A badly named schema migration is fatal. A descriptor without a
    /// matching up migration only warns.
    pub(crate) fn check_catalog(&self, registry: &Registry) -> Result<()> {
        let migrations = discover_migrations(&self.migrations_dir).with_context(|| {
            format!(
                "Failed to read schema migrations from {}",
                self.migrations_dir.display()
            )
        })?;
        if let Some(latest) = latest_migration(&migrations) {
            log::debug!("Latest schema migration on disk: {}", latest.base_name());
        }

        for descriptor in registry.iter() {
            let pinned = migrations
                .iter()
                .any(|m| m.version == descriptor.version && m.direction == MigrationDirection::Up);
            if !pinned {
                log::warn!(
                    "{} has no matching schema migration {}",
                    descriptor.label(),
                    descriptor.version
                );
            }
        }
        Ok(())
    }
}

fn resolve_db_path(root: &Path, path: &str) -> String {
    if path == MEMORY_DB || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

/// Progress bar driven by the engine's step callback
///
/// Hidden with `--verbose`, where per-step log lines already show progress.
pub(crate) fn step_progress(verbose: bool) -> (ProgressBar, ProgressFn<'static>) {
    let pb = if verbose {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    };

    let handle = pb.clone();
    let callback: ProgressFn<'static> = Box::new(move |step: &StepReport, done: usize, total: usize| {
        handle.set_length(total as u64);
        handle.set_position(done as u64);
        handle.set_message(format!("{} {}", step.version, step.table));
    });
    (pb, callback)
}

/// Print one line per step, the row total and the version reached
pub(crate) fn print_report(report: &MigrationReport) {
    for line in report_lines(report) {
        println!("{}", line);
    }
}

fn report_lines(report: &MigrationReport) -> Vec<String> {
    let verb = match report.direction {
        MigrationDirection::Up => "loaded into",
        MigrationDirection::Down => "removed from",
    };
    let mut lines = report
        .steps
        .iter()
        .map(|step| {
            format!(
                "  {:06}  {} rows {} {}",
                step.version, step.rows, verb, step.table
            )
        })
        .collect::<Vec<_>>();

    if report.is_noop() {
        lines.push(format!("No data migrations to apply ({})", report.direction));
    } else {
        lines.push(format!(
            "{} rows {} {} tables",
            report.total_rows(),
            verb,
            report.steps.len()
        ));
    }
    lines.push(format!("Data migration version: {}", report.to));
    lines
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
