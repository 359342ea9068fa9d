//! Execution collaborator: the trait a backend implements to run compiled
//! SQL, plus the driver-neutral result types.

use crate::error::{QueryError, QueryResult};
use crate::dialect::{Dialect, Postgres};
use crate::params::Params;
use crate::types::{decode_rows, fields_of};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Result column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Backend type name, e.g. `int4`.
    pub type_name: String,
}

/// One result row: column name → value, in select-list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<(String, Value)>,
}

impl Row {
    pub fn new(values: Vec<(String, Value)>) -> Self {
        Self { values }
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value of the first column.
    pub fn first(&self) -> Option<&Value> {
        self.values.first().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().map(|(_, value)| value)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values.into_iter().map(|(_, value)| value).collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Rows plus column metadata returned by an [`Executor`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub rows: Vec<Row>,
    pub fields: Vec<Field>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Runs compiled SQL against a backend.
///
/// `sql` carries named placeholders (`:qp0`, `:id`, ...) whose values are in
/// `params`. Backends that bind positionally translate with
/// [`Params::to_positional`] in their dialect's
/// [`placeholder_style`](crate::dialect::Dialect::placeholder_style).
///
/// Implemented for `tokio_postgres::Client`, `tokio_postgres::Transaction`
/// and, with the `pool` feature, `deadpool_postgres::Client`.
pub trait Executor: Send + Sync {
    fn execute(
        &self,
        sql: &str,
        params: &Params,
    ) -> impl std::future::Future<Output = QueryResult<ResultSet>> + Send;
}

impl<T: Executor + ?Sized> Executor for &T {
    async fn execute(&self, sql: &str, params: &Params) -> QueryResult<ResultSet> {
        (**self).execute(sql, params).await
    }
}

fn positional(sql: &str, params: &Params) -> QueryResult<(String, Vec<Value>)> {
    params.to_positional(sql, Postgres.placeholder_style())
}

fn param_refs(values: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

impl Executor for tokio_postgres::Client {
    async fn execute(&self, sql: &str, params: &Params) -> QueryResult<ResultSet> {
        let (sql, values) = positional(sql, params)?;
        let stmt = self.prepare(&sql).await.map_err(QueryError::from_db_error)?;
        let rows = self
            .query(&stmt, &param_refs(&values))
            .await
            .map_err(QueryError::from_db_error)?;
        decode_rows(fields_of(stmt.columns()), &rows)
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    async fn execute(&self, sql: &str, params: &Params) -> QueryResult<ResultSet> {
        let (sql, values) = positional(sql, params)?;
        let stmt = self.prepare(&sql).await.map_err(QueryError::from_db_error)?;
        let rows = self
            .query(&stmt, &param_refs(&values))
            .await
            .map_err(QueryError::from_db_error)?;
        decode_rows(fields_of(stmt.columns()), &rows)
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Client {
    async fn execute(&self, sql: &str, params: &Params) -> QueryResult<ResultSet> {
        // Delegate to the deref target (tokio_postgres::Client).
        let client: &tokio_postgres::Client = self;
        Executor::execute(client, sql, params).await
    }
}
