//! Schema migration parsing

use crate::error::{SqlError, SqlResult};
use dm_core::Dialect;
use sqlparser::ast::Statement;
use sqlparser::dialect::{DuckDbDialect, PostgreSqlDialect};
use sqlparser::parser::{Parser, ParserError};

/// Parses migration SQL in the project's configured dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlParser {
    dialect: Dialect,
}

impl SqlParser {
    /// Create a parser for `dialect`
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Parser for DuckDB SQL
    pub fn duckdb() -> Self {
        Self::new(Dialect::DuckDb)
    }

    /// Parser for PostgreSQL
    pub fn postgres() -> Self {
        Self::new(Dialect::Postgres)
    }

    /// Dialect statements are parsed in
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }

        let parsed = match self.dialect {
            Dialect::DuckDb => Parser::parse_sql(&DuckDbDialect {}, sql),
            Dialect::Postgres => Parser::parse_sql(&PostgreSqlDialect {}, sql),
        };
        parsed.map_err(parse_error)
    }

    /// Double-quote an identifier, doubling embedded quotes
    ///
    /// Both dialects quote the same way.
    pub fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

/// sqlparser only reports the location inside the message text
/// ("... at Line: 2, Column: 5"), so it is read back out of there.
fn parse_error(err: ParserError) -> SqlError {
    let message = err.to_string();
    let (line, column) = error_location(&message).unwrap_or((0, 0));
    SqlError::ParseError {
        message,
        line,
        column,
    }
}

fn error_location(message: &str) -> Option<(usize, usize)> {
    let number_after = |label: &str| -> Option<usize> {
        let (_, rest) = message.rsplit_once(label)?;
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..end].parse().ok()
    };
    Some((number_after("Line: ")?, number_after("Column: ")?))
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
