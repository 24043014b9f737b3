//! Column schema extraction from `CREATE TABLE` statements
//!
//! Walks the AST with a [`Visitor`] that reduces the first table definition it
//! meets into a [`TableSchema`]. Repeated column names keep their first
//! definition.

use crate::error::{SqlError, SqlResult};
use crate::parser::SqlParser;
use dm_core::ColumnSchema;
use sqlparser::ast::{CreateTable, Statement, Visit, Visitor};
use std::fmt;
use std::ops::ControlFlow;

/// Table name and ordered columns derived from a `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name as written in the DDL (schema-qualified if it was)
    pub table_name: String,

    /// Columns in declaration order, de-duplicated by name
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Render the schema back into a `CREATE TABLE` statement
    pub fn to_create_table_sql(&self, parser: &SqlParser) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", parser.quote_ident(&c.name), c.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({})", self.table_name, columns)
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table: {}", self.table_name)?;
        writeln!(f, "columns:")?;
        for column in &self.columns {
            writeln!(f, "    {} {}", column.name, column.data_type)?;
        }
        Ok(())
    }
}

/// Accumulates the first table definition seen during the walk
#[derive(Default)]
struct CreateTableVisitor {
    schema: Option<TableSchema>,
}

impl CreateTableVisitor {
    fn record(&mut self, create: &CreateTable) {
        let table_name = create.name.to_string();
        if self.schema.is_some() {
            log::warn!(
                "Ignoring additional CREATE TABLE {} (only the first table is used)",
                table_name
            );
            return;
        }

        log::debug!("CREATE TABLE {}", table_name);
        let mut columns: Vec<ColumnSchema> = Vec::with_capacity(create.columns.len());
        for def in &create.columns {
            let name = def.name.value.clone();
            if columns.iter().any(|c| c.name == name) {
                log::debug!("Skipping duplicate column {} in {}", name, table_name);
                continue;
            }
            let column = ColumnSchema::new(name, def.data_type.to_string());
            log::debug!("Column {} {}", column.name, column.data_type);
            columns.push(column);
        }

        self.schema = Some(TableSchema {
            table_name,
            columns,
        });
    }
}

impl Visitor for CreateTableVisitor {
    type Break = ();

    fn pre_visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        if let Statement::CreateTable(create) = statement {
            self.record(create);
        }
        ControlFlow::Continue(())
    }
}

/// Extract the table schema from already-parsed statements
///
/// Returns [`SqlError::NoTableDefinition`] when none of the statements define
/// a table.
pub fn extract_table_schema(statements: &[Statement]) -> SqlResult<TableSchema> {
    let mut visitor = CreateTableVisitor::default();
    for stmt in statements {
        let _ = stmt.visit(&mut visitor);
    }
    visitor
        .schema
        .ok_or_else(|| SqlError::NoTableDefinition("input SQL".to_string()))
}

/// Parse `sql` and extract its table schema in one pass
pub fn extract_table_schema_from_sql(parser: &SqlParser, sql: &str) -> SqlResult<TableSchema> {
    let statements = parser.parse(sql)?;
    extract_table_schema(&statements)
}

#[cfg(test)]
#[path = "ddl_test.rs"]
mod tests;
