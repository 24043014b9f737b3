//! CSV loading and header validation
//!
//! The format is deliberately minimal: one record per line, a single
//! character delimiter, no quoting or escaping. The first non-blank line is
//! the header.

use crate::descriptor::DataMigration;
use crate::error::{CoreError, CoreResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A parsed CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// File the document was read from
    pub path: PathBuf,

    /// Field delimiter used to split lines
    pub delimiter: char,

    /// Header fields, trimmed
    pub header: Vec<String>,

    /// Data rows, fields kept verbatim
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Stream `path` line by line into a document
    pub fn load(path: &Path, delimiter: char) -> CoreResult<Self> {
        log::info!("Loading csv from {}", path.display());
        let file = File::open(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(BufReader::new(file), path, delimiter)
    }

    /// Parse a document from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R, path: &Path, delimiter: char) -> CoreResult<Self> {
        let mut header: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|e| CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match header {
                None => {
                    header = Some(
                        line.split(delimiter)
                            .map(|field| field.trim().to_string())
                            .collect(),
                    );
                }
                Some(_) => {
                    rows.push(line.split(delimiter).map(str::to_string).collect());
                }
            }
        }

        let doc = Self {
            path: path.to_path_buf(),
            delimiter,
            header: header.unwrap_or_default(),
            rows,
        };
        log::debug!(
            "Read {} columns and {} rows from {}",
            doc.header.len(),
            doc.row_count(),
            path.display()
        );
        Ok(doc)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Check the CSV header against the descriptor's columns
///
/// The header must equal the descriptor's column names element for element,
/// in order. A permutation of the right names is a mismatch.
pub fn validate_columns(doc: &CsvDocument, migration: &DataMigration) -> CoreResult<()> {
    let expected = migration.column_names();
    if doc.header.iter().map(String::as_str).eq(expected.iter().copied()) {
        return Ok(());
    }

    Err(CoreError::ColumnMismatch {
        path: doc.path.display().to_string(),
        expected: expected.into_iter().map(String::from).collect(),
        found: doc.header.clone(),
    })
}

#[cfg(test)]
#[path = "csv_test.rs"]
mod tests;
