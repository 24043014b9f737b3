//! Schema migration catalog
//!
//! Schema migrations are plain SQL files owned by the schema-migration tool
//! and named `<6-digit-version>_<lowercase_slug>.<up|down>.sql`. The catalog
//! only reads them; it never executes them.

use crate::error::{CoreError, CoreResult};
use crate::version::parse_version;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static MIGRATION_FILE_RE: OnceLock<Regex> = OnceLock::new();

fn migration_file_re() -> &'static Regex {
    MIGRATION_FILE_RE.get_or_init(|| {
        Regex::new(r"^(\d{6})_([a-z_]+)\.(up|down)\.sql$").expect("valid regex literal")
    })
}

/// Direction a schema migration file applies in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDirection {
    /// Forward migration (`.up.sql`)
    Up,
    /// Reverse migration (`.down.sql`)
    Down,
}

impl MigrationDirection {
    /// File-name suffix for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationDirection::Up => "up",
            MigrationDirection::Down => "down",
        }
    }
}

impl fmt::Display for MigrationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema migration file parsed from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Zero-padded version (`000001`)
    pub version: String,

    /// Slug between the version and the direction (`create_users`)
    pub name: String,

    /// Up or down
    pub direction: MigrationDirection,

    /// Path to the SQL file
    pub path: PathBuf,
}

impl Migration {
    /// Parse a migration from its file path
    ///
    /// Only the file name is inspected; it must match the naming convention
    /// exactly.
    pub fn from_path(path: PathBuf) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidMigrationName {
            path: path.display().to_string(),
        };

        let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
        let caps = migration_file_re().captures(file_name).ok_or_else(invalid)?;

        let direction = match &caps[3] {
            "up" => MigrationDirection::Up,
            _ => MigrationDirection::Down,
        };

        Ok(Self {
            version: caps[1].to_string(),
            name: caps[2].to_string(),
            direction,
            path,
        })
    }

    /// Numeric value of the version
    pub fn version_number(&self) -> CoreResult<u64> {
        parse_version(&self.version)
    }

    /// `<version>_<name>`, shared by the up and down files of one migration
    pub fn base_name(&self) -> String {
        format!("{}_{}", self.version, self.name)
    }

    /// Read the SQL text of this migration
    pub fn read_sql(&self) -> CoreResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.base_name(), self.direction)
    }
}

/// Discover every `*.sql` file directly inside `dir`
///
/// Any SQL file whose name does not follow the convention aborts discovery.
/// The result is ordered by file name.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<Migration>> {
    if !dir.is_dir() {
        return Err(CoreError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let pattern = format!(
        "{}/*.sql",
        glob::Pattern::escape(&dir.display().to_string())
    );
    let entries = glob::glob(&pattern).map_err(|e| CoreError::ConfigInvalid {
        message: format!("invalid migrations directory pattern '{}': {}", pattern, e),
    })?;

    let mut migrations = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().display().to_string();
            CoreError::IoWithPath {
                path,
                source: std::io::Error::from(e),
            }
        })?;
        if path.is_dir() {
            continue;
        }
        migrations.push(Migration::from_path(path)?);
    }

    migrations.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!(
        "Discovered {} schema migrations in {}",
        migrations.len(),
        dir.display()
    );
    Ok(migrations)
}

/// Find the migration with `version` in `direction`
pub fn find_migration<'a>(
    migrations: &'a [Migration],
    version: &str,
    direction: MigrationDirection,
) -> Option<&'a Migration> {
    migrations
        .iter()
        .find(|m| m.version == version && m.direction == direction)
}

/// The migration with the greatest version, if any
///
/// Versions are zero-padded to the same width, so string order equals
/// numeric order.
pub fn latest_migration(migrations: &[Migration]) -> Option<&Migration> {
    migrations.iter().max_by(|a, b| a.version.cmp(&b.version))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
