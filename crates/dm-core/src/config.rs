//! Configuration types and parsing for datamigrate.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "datamigrate.yml";

const DEFAULT_DB_PATH: &str = ":memory:";

/// Project configuration from datamigrate.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Directory holding the schema migration SQL files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Directory holding the data migration descriptors
    #[serde(default = "default_data_migrations_dir")]
    pub data_migrations_dir: String,

    /// SQL dialect used to parse schema migrations
    #[serde(default)]
    pub dialect: Dialect,

    /// Table holding the data migration version
    #[serde(default = "default_version_table")]
    pub version_table: String,

    /// Table where the schema-migration tool records its version
    #[serde(default = "default_schema_version_table")]
    pub schema_version_table: String,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// SQL dialect for parsing schema migrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
    /// PostgreSQL dialect
    Postgres,
}

impl Dialect {
    /// Dialect name as written in `datamigrate.yml`
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::DuckDb => "duckdb",
            Dialect::Postgres => "postgres",
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_data_migrations_dir() -> String {
    "datamigrations".to_string()
}

fn default_version_table() -> String {
    "schema_datamigrations".to_string()
}

fn default_schema_version_table() -> String {
    "schema_migrations".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            migrations_dir: default_migrations_dir(),
            data_migrations_dir: default_data_migrations_dir(),
            dialect: Dialect::default(),
            version_table: default_version_table(),
            schema_version_table: default_schema_version_table(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `datamigrate.yml` from a directory, falling back to defaults
    /// when the file does not exist
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    fn validate(&self) -> CoreResult<()> {
        for (field, value) in [
            ("version_table", &self.version_table),
            ("schema_version_table", &self.schema_version_table),
        ] {
            if !is_valid_table_name(value) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "{} '{}' must be a plain or schema-qualified identifier",
                        field, value
                    ),
                });
            }
        }

        if self.version_table == self.schema_version_table {
            return Err(CoreError::ConfigInvalid {
                message: "version_table and schema_version_table must differ".to_string(),
            });
        }
        Ok(())
    }

    /// Schema migrations directory resolved against a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Data migrations directory resolved against a project root
    pub fn data_migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.data_migrations_dir)
    }
}

/// Version table names are interpolated into SQL, so only identifier
/// characters and a single schema separator are accepted.
fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|p| {
            !p.is_empty()
                && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !p.starts_with(|c: char| c.is_ascii_digit())
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
