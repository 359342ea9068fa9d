//! Terminal accessors: compile, run and unpack in one call.

use super::{ColumnSpec, Query, TableSpec};
use crate::client::{Executor, Row};
use crate::connection::Connection;
use crate::error::{QueryError, QueryResult};
use crate::value::Value;

impl Query {
    /// All rows.
    pub async fn all<E: Executor>(&self, conn: &Connection<E>) -> QueryResult<Vec<Row>> {
        conn.create_command(self)?.query_all().await
    }

    /// The first row, or `None` for an empty result.
    pub async fn one<E: Executor>(&self, conn: &Connection<E>) -> QueryResult<Option<Row>> {
        conn.create_command(self)?.query_one().await
    }

    /// First column of every row.
    pub async fn column<E: Executor>(&self, conn: &Connection<E>) -> QueryResult<Vec<Value>> {
        conn.create_command(self)?.query_column().await
    }

    /// First column of the first row.
    pub async fn scalar<E: Executor>(&self, conn: &Connection<E>) -> QueryResult<Option<Value>> {
        conn.create_command(self)?.query_scalar().await
    }

    /// `COUNT(expr)` over the rows this query matches, e.g. `count("*", &conn)`.
    pub async fn count<E: Executor>(&self, expr: &str, conn: &Connection<E>) -> QueryResult<i64> {
        let value = self.aggregate(&format!("COUNT({expr})"), conn).await?;
        match value {
            None | Some(Value::Null) => Ok(0),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| QueryError::decode("COUNT", format!("expected an integer, got {value}"))),
        }
    }

    pub async fn sum<E: Executor>(&self, expr: &str, conn: &Connection<E>) -> QueryResult<Option<Value>> {
        self.aggregate(&format!("SUM({expr})"), conn).await
    }

    pub async fn average<E: Executor>(
        &self,
        expr: &str,
        conn: &Connection<E>,
    ) -> QueryResult<Option<Value>> {
        self.aggregate(&format!("AVG({expr})"), conn).await
    }

    pub async fn min<E: Executor>(&self, expr: &str, conn: &Connection<E>) -> QueryResult<Option<Value>> {
        self.aggregate(&format!("MIN({expr})"), conn).await
    }

    pub async fn max<E: Executor>(&self, expr: &str, conn: &Connection<E>) -> QueryResult<Option<Value>> {
        self.aggregate(&format!("MAX({expr})"), conn).await
    }

    async fn aggregate<E: Executor>(
        &self,
        select: &str,
        conn: &Connection<E>,
    ) -> QueryResult<Option<Value>> {
        let query = self.aggregate_query(select);
        conn.create_command(&query)?.query_scalar().await
    }

    /// Copy of this query selecting only `select`.
    ///
    /// Plain queries get their select list replaced and ORDER BY, LIMIT and
    /// OFFSET dropped. Queries whose row set depends on the select list
    /// (DISTINCT, GROUP BY, HAVING, UNION) are wrapped as
    /// `SELECT expr FROM (query) c` instead.
    pub(crate) fn aggregate_query(&self, select: &str) -> Query {
        let wraps = self.distinct
            || !self.group_by.is_empty()
            || self.having.is_some()
            || !self.union.is_empty();
        if wraps {
            return Query::new()
                .select(ColumnSpec::Bare(select.to_string()))
                .from(TableSpec::subquery("c", self.clone()));
        }

        let mut query = self.clone();
        query.select = vec![ColumnSpec::Bare(select.to_string())];
        query.select_option = None;
        query.order_by.clear();
        query.limit = None;
        query.offset = None;
        query
    }
}
