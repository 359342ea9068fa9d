//! Mutable SELECT specification.
//!
//! [`Query`] accumulates clauses through consuming builder methods and is
//! compiled by [`QueryBuilder`](crate::builder::QueryBuilder). Compilation
//! never modifies a `Query`, so the same value can be built any number of
//! times, against any dialect.
//!
//! # Example
//! ```ignore
//! use querycraft::{Condition, Query, SortOrder};
//!
//! let q = Query::new()
//!     .select("id, name")
//!     .from("user")
//!     .where_(Condition::eq("status", "active"))
//!     .order_by("name asc, age desc")
//!     .limit(10);
//! ```

mod columns;
mod fetch;

pub use columns::{
    ColumnSpec, IntoColumnNames, IntoColumns, IntoOrderBy, IntoTables, SortOrder, TableSpec,
};

use crate::condition::{Condition, HashValue, Operand, Operator};
use crate::params::Params;
use crate::value::Value;

/// `(join type, table, on condition)` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: String,
    pub table: Option<TableSpec>,
    pub on: Option<Condition>,
}

/// Right-hand side of a UNION.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionSource {
    Query(Box<Query>),
    Raw(String),
}

/// UNION member.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub source: UnionSource,
    pub all: bool,
}

/// A single SELECT statement under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub(crate) select: Vec<ColumnSpec>,
    pub(crate) select_option: Option<String>,
    pub(crate) distinct: bool,
    pub(crate) from: Vec<TableSpec>,
    pub(crate) where_: Option<Condition>,
    pub(crate) join: Vec<Join>,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: Option<Condition>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
    pub(crate) union: Vec<Union>,
    pub(crate) params: Params,
}

fn combine(operator: Operator, existing: Option<Condition>, condition: Condition) -> Condition {
    match existing {
        None => condition,
        Some(existing) => Condition::Operator {
            operator,
            operands: vec![Operand::Condition(existing), Operand::Condition(condition)],
        },
    }
}

/// Append positional entries, replace aliased entries with the same alias.
fn merge_columns(target: &mut Vec<ColumnSpec>, columns: Vec<ColumnSpec>) {
    for column in columns {
        let existing = column
            .alias()
            .and_then(|alias| target.iter().position(|c| c.alias() == Some(alias)));
        match existing {
            Some(pos) => target[pos] = column,
            None => target.push(column),
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the select list. Strings are split on commas.
    pub fn select(mut self, columns: impl IntoColumns) -> Self {
        self.select = columns.into_columns();
        self
    }

    /// Replace the select list and set a modifier such as `SQL_CALC_FOUND_ROWS`.
    pub fn select_with_option(mut self, columns: impl IntoColumns, option: impl Into<String>) -> Self {
        self.select = columns.into_columns();
        self.select_option = Some(option.into());
        self
    }

    /// Add columns to the select list.
    pub fn add_select(mut self, columns: impl IntoColumns) -> Self {
        merge_columns(&mut self.select, columns.into_columns());
        self
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn from(mut self, tables: impl IntoTables) -> Self {
        self.from = tables.into_tables();
        self
    }

    /// Replace the WHERE condition.
    pub fn where_(mut self, condition: impl Into<Condition>) -> Self {
        self.where_ = Some(condition.into());
        self
    }

    /// `(existing) AND (condition)`.
    pub fn and_where(mut self, condition: impl Into<Condition>) -> Self {
        self.where_ = Some(combine(Operator::And, self.where_.take(), condition.into()));
        self
    }

    /// `(existing) OR (condition)`.
    pub fn or_where(mut self, condition: impl Into<Condition>) -> Self {
        self.where_ = Some(combine(Operator::Or, self.where_.take(), condition.into()));
        self
    }

    /// Append a join. `join_type` is emitted as written, e.g. `"LEFT JOIN"`.
    pub fn join(
        mut self,
        join_type: impl Into<String>,
        table: impl IntoTables,
        on: Option<Condition>,
    ) -> Self {
        self.join.push(Join {
            join_type: join_type.into(),
            table: table.into_tables().into_iter().next(),
            on,
        });
        self
    }

    pub fn inner_join(self, table: impl IntoTables, on: impl Into<Condition>) -> Self {
        self.join("INNER JOIN", table, Some(on.into()))
    }

    pub fn left_join(self, table: impl IntoTables, on: impl Into<Condition>) -> Self {
        self.join("LEFT JOIN", table, Some(on.into()))
    }

    pub fn right_join(self, table: impl IntoTables, on: impl Into<Condition>) -> Self {
        self.join("RIGHT JOIN", table, Some(on.into()))
    }

    pub fn group_by(mut self, columns: impl IntoColumnNames) -> Self {
        self.group_by = columns.into_column_names();
        self
    }

    pub fn add_group_by(mut self, columns: impl IntoColumnNames) -> Self {
        self.group_by.extend(columns.into_column_names());
        self
    }

    pub fn having(mut self, condition: impl Into<Condition>) -> Self {
        self.having = Some(condition.into());
        self
    }

    pub fn and_having(mut self, condition: impl Into<Condition>) -> Self {
        self.having = Some(combine(Operator::And, self.having.take(), condition.into()));
        self
    }

    pub fn or_having(mut self, condition: impl Into<Condition>) -> Self {
        self.having = Some(combine(Operator::Or, self.having.take(), condition.into()));
        self
    }

    /// Replace the ordering, e.g. `"name asc, age desc"`.
    pub fn order_by(mut self, columns: impl IntoOrderBy) -> Self {
        self.order_by.clear();
        self.merge_order_by(columns.into_order_by());
        self
    }

    /// Add orderings; a column already present keeps its position and takes
    /// the new direction.
    pub fn add_order_by(mut self, columns: impl IntoOrderBy) -> Self {
        self.merge_order_by(columns.into_order_by());
        self
    }

    fn merge_order_by(&mut self, columns: Vec<(String, SortOrder)>) {
        for (column, order) in columns {
            match self.order_by.iter_mut().find(|(c, _)| *c == column) {
                Some(entry) => entry.1 = order,
                None => self.order_by.push((column, order)),
            }
        }
    }

    /// Set the LIMIT. Negative values compile to no LIMIT.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the OFFSET. Values below 1 compile to no OFFSET.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn clear_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn clear_offset(mut self) -> Self {
        self.offset = None;
        self
    }

    pub fn union(mut self, query: Query) -> Self {
        self.union.push(Union {
            source: UnionSource::Query(Box::new(query)),
            all: false,
        });
        self
    }

    pub fn union_all(mut self, query: Query) -> Self {
        self.union.push(Union {
            source: UnionSource::Query(Box::new(query)),
            all: true,
        });
        self
    }

    /// UNION with a raw SQL statement.
    pub fn union_raw(mut self, sql: impl Into<String>, all: bool) -> Self {
        self.union.push(Union {
            source: UnionSource::Raw(sql.into()),
            all,
        });
        self
    }

    /// Replace all bound parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Merge parameters; new values win on name collision.
    pub fn add_params(mut self, params: Params) -> Self {
        self.params.merge(&params);
        self
    }

    /// Bind one named parameter, e.g. `add_param(":id", 1)` for `"id = :id"`.
    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn select_columns(&self) -> &[ColumnSpec] {
        &self.select
    }

    pub fn select_option(&self) -> Option<&str> {
        self.select_option.as_deref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn from_tables(&self) -> &[TableSpec] {
        &self.from
    }

    pub fn where_condition(&self) -> Option<&Condition> {
        self.where_.as_ref()
    }

    pub fn joins(&self) -> &[Join] {
        &self.join
    }

    pub fn group_by_columns(&self) -> &[String] {
        &self.group_by
    }

    pub fn having_condition(&self) -> Option<&Condition> {
        self.having.as_ref()
    }

    pub fn order_by_columns(&self) -> &[(String, SortOrder)] {
        &self.order_by
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<i64> {
        self.offset
    }

    pub fn unions(&self) -> &[Union] {
        &self.union
    }

    pub fn bound_params(&self) -> &Params {
        &self.params
    }

    /// Merge this query's parameters and those of every nested subquery into
    /// `out`, outer query first, then subqueries in clause order.
    pub(crate) fn collect_params(&self, out: &mut Params) {
        out.merge(&self.params);
        for column in &self.select {
            if let ColumnSpec::Subquery { query, .. } = column {
                query.collect_params(out);
            }
        }
        let tables = self.from.iter().chain(self.join.iter().filter_map(|j| j.table.as_ref()));
        for table in tables {
            if let TableSpec::Subquery { query, .. } = table {
                query.collect_params(out);
            }
        }
        let conditions = self
            .join
            .iter()
            .filter_map(|j| j.on.as_ref())
            .chain(self.where_.as_ref())
            .chain(self.having.as_ref());
        for condition in conditions {
            collect_condition_params(condition, out);
        }
        for union in &self.union {
            if let UnionSource::Query(query) = &union.source {
                query.collect_params(out);
            }
        }
    }
}

fn collect_condition_params(condition: &Condition, out: &mut Params) {
    match condition {
        Condition::Raw(_) => {}
        Condition::Hash(pairs) => {
            for (_, value) in pairs {
                if let HashValue::Query(query) = value {
                    query.collect_params(out);
                }
            }
        }
        Condition::Operator { operands, .. } => {
            for operand in operands {
                match operand {
                    Operand::Condition(condition) => collect_condition_params(condition, out),
                    Operand::Query(query) => query.collect_params(out),
                    _ => {}
                }
            }
        }
    }
}
