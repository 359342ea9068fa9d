//! Database dialects: identifier quoting, type maps and DDL primitives.
//!
//! A [`Dialect`] must provide the two leaf quoting primitives
//! ([`Dialect::quote_simple_table_name`] and [`Dialect::quote_simple_column_name`])
//! and its abstract → physical type map. Qualified-name handling and the
//! portable DDL statements are provided on top of those; statements with no
//! portable form fail with [`QueryError::NotSupported`] unless overridden.

mod mysql;
mod postgres;

pub use mysql::MySql;
pub use postgres::Postgres;

use crate::column_type::ColumnType;
use crate::error::{QueryError, QueryResult};
use crate::params::PlaceholderStyle;
use std::fmt;

/// Backend profile consumed by the compiler.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Human-readable dialect name (e.g. "MySQL").
    fn name(&self) -> &'static str;

    /// Quote a single table-name segment (no dots).
    fn quote_simple_table_name(&self, name: &str) -> String;

    /// Quote a single column-name segment (no dots).
    fn quote_simple_column_name(&self, name: &str) -> String;

    /// Physical type for an abstract column type.
    fn column_type(&self, ty: ColumnType) -> &'static str;

    /// How the backend's driver writes positional parameters.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Quote a possibly schema-qualified table name.
    ///
    /// Names containing `(` or `{{` are treated as expressions and returned
    /// unchanged.
    fn quote_table_name(&self, name: &str) -> String {
        if name.contains('(') || name.contains("{{") {
            return name.to_string();
        }
        name.split('.')
            .map(|part| self.quote_simple_table_name(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quote a possibly table-qualified column name.
    ///
    /// Everything before the last `.` is quoted as a table name. Names
    /// containing `(`, `[[` or `{{` are returned unchanged.
    fn quote_column_name(&self, name: &str) -> String {
        if name.contains('(') || name.contains("[[") || name.contains("{{") {
            return name.to_string();
        }
        match name.rfind('.') {
            Some(pos) => format!(
                "{}.{}",
                self.quote_table_name(&name[..pos]),
                self.quote_simple_column_name(&name[pos + 1..])
            ),
            None => self.quote_simple_column_name(name),
        }
    }

    fn rename_table_sql(&self, old_name: &str, new_name: &str) -> String {
        format!(
            "RENAME TABLE {} TO {}",
            self.quote_table_name(old_name),
            self.quote_table_name(new_name)
        )
    }

    /// `column_type` is already resolved to a physical type.
    fn rename_column_sql(
        &self,
        table: &str,
        old_name: &str,
        new_name: &str,
        column_type: &str,
    ) -> String {
        let _ = column_type;
        format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            self.quote_table_name(table),
            self.quote_column_name(old_name),
            self.quote_column_name(new_name)
        )
    }

    fn alter_column_sql(&self, table: &str, column: &str, column_type: &str) -> String {
        let column = self.quote_column_name(column);
        format!(
            "ALTER TABLE {} CHANGE {column} {column} {column_type}",
            self.quote_table_name(table)
        )
    }

    /// `columns` is the already quoted, comma-separated column list.
    fn create_index_sql(&self, name: &str, table: &str, columns: &str, unique: bool) -> String {
        format!(
            "{} {} ON {} ({columns})",
            if unique { "CREATE UNIQUE INDEX" } else { "CREATE INDEX" },
            self.quote_table_name(name),
            self.quote_table_name(table)
        )
    }

    fn drop_index_sql(&self, name: &str, table: &str) -> String {
        format!(
            "DROP INDEX {} ON {}",
            self.quote_table_name(name),
            self.quote_table_name(table)
        )
    }

    /// Reset the auto-increment counter of `table`.
    fn reset_sequence_sql(&self, table: &str, value: Option<i64>) -> QueryResult<String> {
        let _ = (table, value);
        Err(QueryError::not_supported(self.name(), "reset_sequence"))
    }

    /// Enable or disable referential integrity checks.
    fn check_integrity_sql(&self, check: bool, schema: &str, table: &str) -> QueryResult<String> {
        let _ = (check, schema, table);
        Err(QueryError::not_supported(self.name(), "check_integrity"))
    }
}
