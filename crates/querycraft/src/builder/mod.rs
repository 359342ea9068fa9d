//! Query compiler: turns a [`Query`] into dialect-specific SQL plus bound
//! parameters.
//!
//! Clauses are compiled in a fixed order (SELECT, FROM, JOIN, WHERE,
//! GROUP BY, HAVING) and joined with a single space, skipping empty ones.
//! ORDER BY and LIMIT/OFFSET follow; a non-empty UNION wraps everything
//! before it in parentheses.
//!
//! All placeholders of one [`QueryBuilder::build`] call, subqueries included,
//! come from a single [`PlaceholderAllocator`], so names never collide.

mod condition;
mod ddl;

use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::params::{Params, PlaceholderAllocator};
use crate::query::{ColumnSpec, Join, Query, SortOrder, TableSpec, Union, UnionSource};
use regex::Regex;
use std::sync::OnceLock;

const JOIN_ERROR: &str = "A join clause must be specified as a join type, a join table, and optionally a join condition.";

fn select_alias_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(.*?)(\s+as\s+|\s+)([\w\-_.]+)$").expect("valid regex"))
}

fn table_alias_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(.*?)(\s+as|)\s+([^ ]+)$").expect("valid regex"))
}

/// Compiles queries for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'d> {
    dialect: &'d dyn Dialect,
    separator: &'static str,
}

impl<'d> QueryBuilder<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            separator: " ",
        }
    }

    /// Use a different clause separator, e.g. `"\n"` for readable output.
    pub fn with_separator(mut self, separator: &'static str) -> Self {
        self.separator = separator;
        self
    }

    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Compile `query` to `(sql, params)`.
    ///
    /// `params` seeds the parameter map; the parameters of the query and of
    /// every nested subquery are merged over it before any placeholder is
    /// allocated. The returned map holds the seed, those parameters and every
    /// placeholder generated during compilation.
    pub fn build(&self, query: &Query, params: Params) -> QueryResult<(String, Params)> {
        let mut params = params;
        query.collect_params(&mut params);
        let mut alloc = PlaceholderAllocator::new(params);
        let sql = self.compile(query, &mut alloc)?;
        let params = alloc.into_params();

        tracing::debug!(
            target: "querycraft.sql",
            dialect = self.dialect.name(),
            sql = %sql,
            params = params.len(),
            "built query"
        );

        Ok((sql, params))
    }

    /// Compile `query` sharing an allocator with an enclosing compilation.
    /// The allocator already holds every parameter the query tree binds.
    pub(crate) fn compile(
        &self,
        query: &Query,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let clauses = [
            self.build_select(
                &query.select,
                query.distinct,
                query.select_option.as_deref(),
                alloc,
            )?,
            self.build_from(&query.from, alloc)?,
            self.build_join(&query.join, alloc)?,
            self.build_where(query.where_.as_ref(), alloc)?,
            self.build_group_by(&query.group_by),
            self.build_having(query.having.as_ref(), alloc)?,
        ];
        let mut sql = clauses
            .into_iter()
            .filter(|clause| !clause.is_empty())
            .collect::<Vec<_>>()
            .join(self.separator);

        let order_by = self.build_order_by(&query.order_by);
        if !order_by.is_empty() {
            sql.push_str(self.separator);
            sql.push_str(&order_by);
        }
        let limit = self.build_limit(query.limit, query.offset);
        if !limit.is_empty() {
            sql.push_str(self.separator);
            sql.push_str(&limit);
        }

        let union = self.build_union(&query.union, alloc)?;
        if !union.is_empty() {
            sql = format!("({sql}){}{union}", self.separator);
        }

        Ok(sql)
    }

    fn quote_column(&self, column: &str) -> String {
        if column.contains('(') {
            column.to_string()
        } else {
            self.dialect.quote_column_name(column)
        }
    }

    fn quote_table(&self, table: &str) -> String {
        if table.contains('(') {
            table.to_string()
        } else {
            self.dialect.quote_table_name(table)
        }
    }

    pub fn build_select(
        &self,
        columns: &[ColumnSpec],
        distinct: bool,
        select_option: Option<&str>,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let mut select = String::from(if distinct { "SELECT DISTINCT" } else { "SELECT" });
        if let Some(option) = select_option {
            select.push(' ');
            select.push_str(option);
        }

        if columns.is_empty() {
            select.push_str(" *");
            return Ok(select);
        }

        let mut parts = Vec::with_capacity(columns.len());
        for column in columns {
            let part = match column {
                ColumnSpec::Subquery { alias, query } => {
                    let sql = self.compile(query, alloc)?;
                    format!("({sql}) AS {}", self.dialect.quote_column_name(alias))
                }
                ColumnSpec::Aliased { alias, expr } => {
                    format!(
                        "{} AS {}",
                        self.quote_column(expr),
                        self.dialect.quote_column_name(alias)
                    )
                }
                ColumnSpec::Bare(expr) if expr.contains('(') => expr.clone(),
                ColumnSpec::Bare(expr) => match select_alias_re().captures(expr) {
                    Some(caps) => format!(
                        "{} AS {}",
                        self.dialect.quote_column_name(&caps[1]),
                        self.dialect.quote_column_name(&caps[3])
                    ),
                    None => self.dialect.quote_column_name(expr),
                },
            };
            parts.push(part);
        }

        Ok(format!("{select} {}", parts.join(", ")))
    }

    pub fn build_from(
        &self,
        tables: &[TableSpec],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        if tables.is_empty() {
            return Ok(String::new());
        }
        let tables = self.quote_table_names(tables, alloc)?;
        Ok(format!("FROM {}", tables.join(", ")))
    }

    pub fn build_join(&self, joins: &[Join], alloc: &mut PlaceholderAllocator) -> QueryResult<String> {
        let mut parts = Vec::with_capacity(joins.len());
        for join in joins {
            let join_type = join.join_type.trim();
            let table = match &join.table {
                Some(table) if !join_type.is_empty() => table,
                _ => return Err(QueryError::InvalidJoin(JOIN_ERROR.to_string())),
            };
            let table = self.quote_table_name(table, alloc)?;
            let mut part = format!("{join_type} {table}");
            if let Some(on) = &join.on {
                let condition = self.build_condition(on, alloc)?;
                if !condition.is_empty() {
                    part.push_str(" ON ");
                    part.push_str(&condition);
                }
            }
            parts.push(part);
        }
        Ok(parts.join(self.separator))
    }

    /// Quote FROM / JOIN entries, splitting inline aliases.
    pub fn quote_table_names(
        &self,
        tables: &[TableSpec],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<Vec<String>> {
        tables
            .iter()
            .map(|table| self.quote_table_name(table, alloc))
            .collect()
    }

    fn quote_table_name(
        &self,
        table: &TableSpec,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        Ok(match table {
            TableSpec::Subquery { alias, query } => {
                let sql = self.compile(query, alloc)?;
                format!("({sql}) {}", self.dialect.quote_table_name(alias))
            }
            TableSpec::Aliased { alias, table } => {
                format!(
                    "{} {}",
                    self.quote_table(table),
                    self.dialect.quote_table_name(alias)
                )
            }
            TableSpec::Bare(table) if table.contains('(') => table.clone(),
            TableSpec::Bare(table) => match table_alias_re().captures(table) {
                Some(caps) => format!(
                    "{} {}",
                    self.dialect.quote_table_name(&caps[1]),
                    self.dialect.quote_table_name(&caps[3])
                ),
                None => self.dialect.quote_table_name(table),
            },
        })
    }

    pub fn build_where(
        &self,
        condition: Option<&Condition>,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let Some(condition) = condition else {
            return Ok(String::new());
        };
        let sql = self.build_condition(condition, alloc)?;
        Ok(if sql.is_empty() {
            sql
        } else {
            format!("WHERE {sql}")
        })
    }

    pub fn build_having(
        &self,
        condition: Option<&Condition>,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let Some(condition) = condition else {
            return Ok(String::new());
        };
        let sql = self.build_condition(condition, alloc)?;
        Ok(if sql.is_empty() {
            sql
        } else {
            format!("HAVING {sql}")
        })
    }

    pub fn build_group_by(&self, columns: &[String]) -> String {
        if columns.is_empty() {
            String::new()
        } else {
            format!("GROUP BY {}", self.build_columns(columns))
        }
    }

    /// Quote a column list, leaving expressions with `(` untouched.
    pub fn build_columns(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| self.quote_column(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn build_order_by(&self, columns: &[(String, SortOrder)]) -> String {
        if columns.is_empty() {
            return String::new();
        }
        let orders = columns
            .iter()
            .map(|(column, order)| match order {
                SortOrder::Asc => self.dialect.quote_column_name(column),
                SortOrder::Desc => format!("{} DESC", self.dialect.quote_column_name(column)),
            })
            .collect::<Vec<_>>();
        format!("ORDER BY {}", orders.join(", "))
    }

    /// `LIMIT n [OFFSET m]`. Negative limits and offsets below 1 are omitted.
    pub fn build_limit(&self, limit: Option<i64>, offset: Option<i64>) -> String {
        let mut sql = String::new();
        if let Some(limit) = limit.filter(|l| *l >= 0) {
            sql.push_str(&format!("LIMIT {limit}"));
        }
        if let Some(offset) = offset.filter(|o| *o > 0) {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql.trim_start().to_string()
    }

    pub fn build_union(
        &self,
        unions: &[Union],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let mut result = String::new();
        for union in unions {
            let sql = match &union.source {
                UnionSource::Query(query) => self.compile(query, alloc)?,
                UnionSource::Raw(sql) => sql.clone(),
            };
            result.push_str("UNION ");
            if union.all {
                result.push_str("ALL ");
            }
            result.push_str(&format!("( {sql} ) "));
        }
        Ok(result.trim().to_string())
    }
}

#[cfg(test)]
mod tests;
