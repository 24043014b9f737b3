//! Data migration descriptor files
//!
//! Each data migration is a YAML file binding one CSV source to one target
//! table, pinned to the schema migration version that created the table:
//!
//! ```yaml
//! version: "000001"
//! csv_path: data/countries.csv
//! delimiter: ","
//! pre: ""
//! post: ""
//! table_name: countries
//! columns:
//!   - name: id
//!     type: INTEGER
//!   - name: name
//!     type: VARCHAR
//! ```

use crate::error::{CoreError, CoreResult};
use crate::version::parse_version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single column of a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,

    /// Declared SQL type, as written in the DDL
    #[serde(rename = "type")]
    pub data_type: String,
}

impl ColumnSchema {
    /// Create a column from a name and a SQL type
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A versioned data migration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMigration {
    /// Version string, matching the schema migration it is pinned to
    pub version: String,

    /// CSV file to load (relative paths resolve against the working directory)
    #[serde(default)]
    pub csv_path: String,

    /// Single-character field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Opaque hook text, carried through unchanged
    #[serde(default)]
    pub pre: String,

    /// Opaque hook text, carried through unchanged
    #[serde(default)]
    pub post: String,

    /// Target table
    pub table_name: String,

    /// Expected CSV header, in order
    #[serde(default)]
    pub columns: Vec<ColumnSchema>,

    /// File this descriptor was read from
    #[serde(skip)]
    pub source_path: PathBuf,
}

fn default_delimiter() -> char {
    ','
}

impl DataMigration {
    /// Create a descriptor with an empty CSV path and a comma delimiter
    pub fn new(
        version: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnSchema>,
    ) -> Self {
        Self {
            version: version.into(),
            csv_path: String::new(),
            delimiter: default_delimiter(),
            pre: String::new(),
            post: String::new(),
            table_name: table_name.into(),
            columns,
            source_path: PathBuf::new(),
        }
    }

    /// Read and decode a descriptor file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut migration: DataMigration =
            serde_yaml::from_str(&content).map_err(|e| CoreError::InvalidDescriptor {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;
        migration.source_path = path.to_path_buf();
        Ok(migration)
    }

    /// Serialize the descriptor to YAML
    pub fn to_yaml(&self) -> CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the descriptor to `path`
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Numeric value of the version
    pub fn version_number(&self) -> CoreResult<u64> {
        parse_version(&self.version)
    }

    /// Path of the CSV source
    pub fn csv_path(&self) -> &Path {
        Path::new(&self.csv_path)
    }

    /// Expected column names, in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Human-readable label for logs and errors
    pub fn label(&self) -> String {
        if self.source_path.as_os_str().is_empty() {
            format!("data migration {}", self.version)
        } else {
            self.source_path.display().to_string()
        }
    }
}

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod tests;
