use super::Dialect;
use crate::column_type::ColumnType;
use crate::error::{QueryError, QueryResult};
use crate::params::PlaceholderStyle;

/// PostgreSQL: double-quote quoting, `$N` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn quote_simple_table_name(&self, name: &str) -> String {
        if name.contains('"') {
            name.to_string()
        } else {
            format!("\"{name}\"")
        }
    }

    fn quote_simple_column_name(&self, name: &str) -> String {
        if name.contains('"') || name == "*" {
            name.to_string()
        } else {
            format!("\"{name}\"")
        }
    }

    fn column_type(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::Pk => "serial NOT NULL PRIMARY KEY",
            ColumnType::BigPk => "bigserial NOT NULL PRIMARY KEY",
            ColumnType::String => "varchar(255)",
            ColumnType::Text => "text",
            ColumnType::SmallInt => "smallint",
            ColumnType::Integer => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::Float => "double precision",
            ColumnType::Double => "double precision",
            ColumnType::Decimal => "numeric(10,0)",
            ColumnType::DateTime => "timestamp(0)",
            ColumnType::Timestamp => "timestamp(0)",
            ColumnType::Time => "time(0)",
            ColumnType::Date => "date",
            ColumnType::Binary => "bytea",
            ColumnType::Boolean => "boolean",
            ColumnType::Money => "numeric(19,4)",
        }
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Dollar
    }

    fn rename_table_sql(&self, old_name: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote_table_name(old_name),
            self.quote_table_name(new_name)
        )
    }

    fn alter_column_sql(&self, table: &str, column: &str, column_type: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {column_type}",
            self.quote_table_name(table),
            self.quote_column_name(column)
        )
    }

    fn drop_index_sql(&self, name: &str, _table: &str) -> String {
        format!("DROP INDEX {}", self.quote_table_name(name))
    }

    fn check_integrity_sql(&self, check: bool, schema: &str, table: &str) -> QueryResult<String> {
        if table.is_empty() {
            return Err(QueryError::validation(
                "PostgreSQL integrity checks are toggled per table; a table name is required",
            ));
        }
        let table = if schema.is_empty() {
            table.to_string()
        } else {
            format!("{schema}.{table}")
        };
        Ok(format!(
            "ALTER TABLE {} {} TRIGGER ALL",
            self.quote_table_name(&table),
            if check { "ENABLE" } else { "DISABLE" }
        ))
    }
}
