//! Error types for dm-sql

use thiserror::Error;

/// SQL parsing and DDL extraction errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// SQL parsed but contains no table definition (S003)
    #[error("[S003] No CREATE TABLE statement found in {0}")]
    NoTableDefinition(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
