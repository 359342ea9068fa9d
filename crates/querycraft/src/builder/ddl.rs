//! DDL statement helpers.
//!
//! Column types may be given as abstract tokens (`"string"`, `"pk"`), which
//! are mapped through the dialect's type map, or as physical types which
//! pass through unchanged. `"string(200) NOT NULL"` keeps its arguments and
//! suffix: `varchar(200) NOT NULL` on MySQL.

use super::QueryBuilder;
use crate::column_type::ColumnType;
use crate::error::QueryResult;
use crate::query::IntoColumnNames;
use regex::{NoExpand, Regex};
use std::sync::OnceLock;

fn type_with_args_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\((.+?)\)(.*)$").expect("valid regex"))
}

fn type_with_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\s+").expect("valid regex"))
}

fn parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.+\)").expect("valid regex"))
}

impl QueryBuilder<'_> {
    /// Resolve a column type to the dialect's physical type.
    pub fn column_type(&self, ty: &str) -> String {
        let lookup = |token: &str| token.parse::<ColumnType>().ok().map(|t| self.dialect.column_type(t));

        if let Some(physical) = lookup(ty) {
            return physical.to_string();
        }
        if let Some(caps) = type_with_args_re().captures(ty) {
            return match lookup(&caps[1]) {
                Some(physical) => {
                    let args = format!("({})", &caps[2]);
                    format!("{}{}", parens_re().replacen(physical, 1, NoExpand(&args)), &caps[3])
                }
                None => ty.to_string(),
            };
        }
        if let Some(caps) = type_with_suffix_re().captures(ty)
            && let Some(physical) = lookup(&caps[1])
        {
            return format!("{physical}{}", &ty[caps[1].len()..]);
        }
        ty.to_string()
    }

    fn quote_column_list(&self, columns: impl IntoColumnNames) -> String {
        self.build_columns(&columns.into_column_names())
    }

    /// `CREATE TABLE`. A column with an empty name is taken as a raw
    /// definition line (e.g. a table constraint).
    pub fn create_table<K, V>(
        &self,
        table: &str,
        columns: impl IntoIterator<Item = (K, V)>,
        options: Option<&str>,
    ) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let lines = columns
            .into_iter()
            .map(|(name, ty)| {
                let (name, ty) = (name.as_ref(), ty.as_ref());
                if name.is_empty() {
                    format!("\t{ty}")
                } else {
                    format!(
                        "\t{} {}",
                        self.dialect.quote_column_name(name),
                        self.column_type(ty)
                    )
                }
            })
            .collect::<Vec<_>>();
        let mut sql = format!(
            "CREATE TABLE {} (\n{}\n)",
            self.dialect.quote_table_name(table),
            lines.join(",\n")
        );
        if let Some(options) = options {
            sql.push(' ');
            sql.push_str(options);
        }
        sql
    }

    pub fn rename_table(&self, old_name: &str, new_name: &str) -> String {
        self.dialect.rename_table_sql(old_name, new_name)
    }

    pub fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.dialect.quote_table_name(table))
    }

    pub fn truncate_table(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {}", self.dialect.quote_table_name(table))
    }

    pub fn add_column(&self, table: &str, column: &str, ty: &str) -> String {
        format!(
            "ALTER TABLE {} ADD {} {}",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(column),
            self.column_type(ty)
        )
    }

    pub fn drop_column(&self, table: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(column)
        )
    }

    /// Rename a column. MySQL needs the column type to restate the definition.
    pub fn rename_column(&self, table: &str, old_name: &str, new_name: &str, ty: &str) -> String {
        self.dialect
            .rename_column_sql(table, old_name, new_name, &self.column_type(ty))
    }

    pub fn alter_column(&self, table: &str, column: &str, ty: &str) -> String {
        self.dialect
            .alter_column_sql(table, column, &self.column_type(ty))
    }

    pub fn add_primary_key(&self, name: &str, table: &str, columns: impl IntoColumnNames) -> String {
        format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({})",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(name),
            self.quote_column_list(columns)
        )
    }

    pub fn drop_primary_key(&self, name: &str, table: &str) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(name)
        )
    }

    /// `ADD CONSTRAINT ... FOREIGN KEY ... REFERENCES ...` with optional
    /// referential actions such as `CASCADE` or `SET NULL`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_foreign_key(
        &self,
        name: &str,
        table: &str,
        columns: impl IntoColumnNames,
        ref_table: &str,
        ref_columns: impl IntoColumnNames,
        on_delete: Option<&str>,
        on_update: Option<&str>,
    ) -> String {
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(name),
            self.quote_column_list(columns),
            self.dialect.quote_table_name(ref_table),
            self.quote_column_list(ref_columns)
        );
        if let Some(action) = on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action);
        }
        if let Some(action) = on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action);
        }
        sql
    }

    pub fn drop_foreign_key(&self, name: &str, table: &str) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(name)
        )
    }

    pub fn create_index(
        &self,
        name: &str,
        table: &str,
        columns: impl IntoColumnNames,
        unique: bool,
    ) -> String {
        self.dialect
            .create_index_sql(name, table, &self.quote_column_list(columns), unique)
    }

    pub fn drop_index(&self, name: &str, table: &str) -> String {
        self.dialect.drop_index_sql(name, table)
    }

    /// Reset the auto-increment counter. `None` restarts at 1.
    pub fn reset_sequence(&self, table: &str, value: Option<i64>) -> QueryResult<String> {
        self.dialect.reset_sequence_sql(table, value)
    }

    /// Turn referential integrity checks on or off.
    pub fn check_integrity(&self, check: bool, schema: &str, table: &str) -> QueryResult<String> {
        self.dialect.check_integrity_sql(check, schema, table)
    }
}
