//! Select-list, table and ordering entries plus the conversions the query
//! mutators accept.

use super::Query;

/// Entry of a SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpec {
    /// Column name or expression, optionally with an inline alias
    /// (`"name AS n"`, `"name n"`).
    Bare(String),
    /// `expr AS alias`.
    Aliased { alias: String, expr: String },
    /// `(subquery) AS alias`.
    Subquery { alias: String, query: Box<Query> },
}

impl ColumnSpec {
    pub fn aliased(alias: impl Into<String>, expr: impl Into<String>) -> Self {
        ColumnSpec::Aliased {
            alias: alias.into(),
            expr: expr.into(),
        }
    }

    pub fn subquery(alias: impl Into<String>, query: Query) -> Self {
        ColumnSpec::Subquery {
            alias: alias.into(),
            query: Box::new(query),
        }
    }

    /// Key used when merging select lists: the alias, if any.
    pub(crate) fn alias(&self) -> Option<&str> {
        match self {
            ColumnSpec::Bare(_) => None,
            ColumnSpec::Aliased { alias, .. } | ColumnSpec::Subquery { alias, .. } => Some(alias),
        }
    }
}

/// Entry of a FROM list or a JOIN target.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSpec {
    /// Table name, optionally with an inline alias (`"user u"`, `"user AS u"`).
    Bare(String),
    /// `table alias`.
    Aliased { alias: String, table: String },
    /// `(subquery) alias`.
    Subquery { alias: String, query: Box<Query> },
}

impl TableSpec {
    pub fn aliased(alias: impl Into<String>, table: impl Into<String>) -> Self {
        TableSpec::Aliased {
            alias: alias.into(),
            table: table.into(),
        }
    }

    pub fn subquery(alias: impl Into<String>, query: Query) -> Self {
        TableSpec::Subquery {
            alias: alias.into(),
            query: Box::new(query),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Split comma-separated input, trimming around each comma.
///
/// Only top-level commas split: commas inside parentheses or quotes belong
/// to a function call or literal.
pub(crate) fn split_csv(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Conversion into SELECT-list entries.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<ColumnSpec>;
}

/// Conversion into FROM-list entries.
pub trait IntoTables {
    fn into_tables(self) -> Vec<TableSpec>;
}

/// Conversion into plain column names (GROUP BY, DDL column lists).
pub trait IntoColumnNames {
    fn into_column_names(self) -> Vec<String>;
}

/// Conversion into ORDER BY entries.
pub trait IntoOrderBy {
    fn into_order_by(self) -> Vec<(String, SortOrder)>;
}

macro_rules! impl_name_lists {
    ($trait:ident, $method:ident, $out:ty, $bare:expr) => {
        impl $trait for &str {
            fn $method(self) -> Vec<$out> {
                split_csv(self).into_iter().map($bare).collect()
            }
        }

        impl $trait for String {
            fn $method(self) -> Vec<$out> {
                self.as_str().$method()
            }
        }

        impl $trait for Vec<&str> {
            fn $method(self) -> Vec<$out> {
                self.into_iter().map(|s| $bare(s.to_string())).collect()
            }
        }

        impl $trait for Vec<String> {
            fn $method(self) -> Vec<$out> {
                self.into_iter().map($bare).collect()
            }
        }

        impl $trait for &[&str] {
            fn $method(self) -> Vec<$out> {
                self.iter().map(|s| $bare(s.to_string())).collect()
            }
        }

        impl<const N: usize> $trait for [&str; N] {
            fn $method(self) -> Vec<$out> {
                self.into_iter().map(|s| $bare(s.to_string())).collect()
            }
        }
    };
}

impl_name_lists!(IntoColumns, into_columns, ColumnSpec, ColumnSpec::Bare);
impl_name_lists!(IntoTables, into_tables, TableSpec, TableSpec::Bare);
impl_name_lists!(IntoColumnNames, into_column_names, String, |s: String| s);

impl IntoColumns for ColumnSpec {
    fn into_columns(self) -> Vec<ColumnSpec> {
        vec![self]
    }
}

impl IntoColumns for Vec<ColumnSpec> {
    fn into_columns(self) -> Vec<ColumnSpec> {
        self
    }
}

impl IntoTables for TableSpec {
    fn into_tables(self) -> Vec<TableSpec> {
        vec![self]
    }
}

impl IntoTables for Vec<TableSpec> {
    fn into_tables(self) -> Vec<TableSpec> {
        self
    }
}

/// Parse `"name asc, age desc"`; a missing direction means ascending.
fn parse_order_by(value: &str) -> Vec<(String, SortOrder)> {
    value
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            for (suffix, order) in [("asc", SortOrder::Asc), ("desc", SortOrder::Desc)] {
                if lower.ends_with(suffix) {
                    let head = &part[..part.len() - suffix.len()];
                    if head.ends_with(char::is_whitespace) && !head.trim().is_empty() {
                        return (head.trim_end().to_string(), order);
                    }
                }
            }
            (part.to_string(), SortOrder::Asc)
        })
        .collect()
}

impl IntoOrderBy for &str {
    fn into_order_by(self) -> Vec<(String, SortOrder)> {
        parse_order_by(self)
    }
}

impl IntoOrderBy for String {
    fn into_order_by(self) -> Vec<(String, SortOrder)> {
        parse_order_by(&self)
    }
}

impl IntoOrderBy for (&str, SortOrder) {
    fn into_order_by(self) -> Vec<(String, SortOrder)> {
        vec![(self.0.to_string(), self.1)]
    }
}

impl IntoOrderBy for Vec<(&str, SortOrder)> {
    fn into_order_by(self) -> Vec<(String, SortOrder)> {
        self.into_iter().map(|(c, o)| (c.to_string(), o)).collect()
    }
}

impl IntoOrderBy for Vec<(String, SortOrder)> {
    fn into_order_by(self) -> Vec<(String, SortOrder)> {
        self
    }
}

impl<const N: usize> IntoOrderBy for [(&str, SortOrder); N] {
    fn into_order_by(self) -> Vec<(String, SortOrder)> {
        self.into_iter().map(|(c, o)| (c.to_string(), o)).collect()
    }
}
