use super::Dialect;
use crate::column_type::ColumnType;
use crate::error::QueryResult;
use crate::params::PlaceholderStyle;

/// MySQL / MariaDB: backtick quoting, `?` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn quote_simple_table_name(&self, name: &str) -> String {
        if name.contains('`') {
            name.to_string()
        } else {
            format!("`{name}`")
        }
    }

    fn quote_simple_column_name(&self, name: &str) -> String {
        if name.contains('`') || name == "*" {
            name.to_string()
        } else {
            format!("`{name}`")
        }
    }

    fn column_type(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::Pk => "int(11) NOT NULL AUTO_INCREMENT PRIMARY KEY",
            ColumnType::BigPk => "bigint(20) NOT NULL AUTO_INCREMENT PRIMARY KEY",
            ColumnType::String => "varchar(255)",
            ColumnType::Text => "text",
            ColumnType::SmallInt => "smallint(6)",
            ColumnType::Integer => "int(11)",
            ColumnType::BigInt => "bigint(20)",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Decimal => "decimal(10,0)",
            ColumnType::DateTime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Time => "time",
            ColumnType::Date => "date",
            ColumnType::Binary => "blob",
            ColumnType::Boolean => "tinyint(1)",
            ColumnType::Money => "decimal(19,4)",
        }
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::QuestionMark
    }

    fn rename_column_sql(
        &self,
        table: &str,
        old_name: &str,
        new_name: &str,
        column_type: &str,
    ) -> String {
        format!(
            "ALTER TABLE {} CHANGE {} {} {column_type}",
            self.quote_table_name(table),
            self.quote_column_name(old_name),
            self.quote_column_name(new_name)
        )
    }

    fn create_index_sql(&self, name: &str, table: &str, columns: &str, unique: bool) -> String {
        format!(
            "ALTER TABLE {}{}{} ({columns})",
            self.quote_table_name(table),
            if unique { " ADD UNIQUE INDEX " } else { " ADD INDEX " },
            self.quote_table_name(name)
        )
    }

    fn reset_sequence_sql(&self, table: &str, value: Option<i64>) -> QueryResult<String> {
        Ok(format!(
            "ALTER TABLE {} AUTO_INCREMENT={}",
            self.quote_table_name(table),
            value.unwrap_or(1)
        ))
    }

    fn check_integrity_sql(&self, check: bool, _schema: &str, _table: &str) -> QueryResult<String> {
        Ok(format!("SET FOREIGN_KEY_CHECKS = {}", u8::from(check)))
    }
}
