//! A compiled statement ready to run on a [`Connection`].

use crate::client::{Executor, ResultSet, Row};
use crate::connection::Connection;
use crate::error::{QueryError, QueryResult};
use crate::params::Params;
use crate::value::Value;
use std::time::Instant;

/// SQL text plus bound parameters, tied to the connection that runs it.
#[derive(Debug)]
pub struct Command<'c, E> {
    connection: &'c Connection<E>,
    sql: String,
    params: Params,
}

impl<'c, E: Executor> Command<'c, E> {
    pub fn new(connection: &'c Connection<E>, sql: impl Into<String>, params: Params) -> Self {
        Self {
            connection,
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// SQL and values in the positional form of the connection's dialect
    /// (`?` for MySQL, `$N` for PostgreSQL), for drivers that bind by position.
    pub fn to_positional(&self) -> QueryResult<(String, Vec<Value>)> {
        let style = self.connection.dialect().placeholder_style();
        self.params.to_positional(&self.sql, style)
    }

    /// Bind (or rebind) one named parameter.
    pub fn bind_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Run the statement once.
    ///
    /// Applies the connection's query timeout and emits `querycraft.sql`
    /// tracing events. Errors are returned unchanged; nothing is retried.
    pub async fn execute(&self) -> QueryResult<ResultSet> {
        let config = self.connection.config();
        let sql = config.truncate_sql(&self.sql);

        if config.logging_enabled {
            tracing::debug!(
                target: "querycraft.sql",
                sql = %sql,
                params = self.params.len(),
                "executing query"
            );
        }

        let start = Instant::now();
        let future = Executor::execute(self.connection.executor(), &self.sql, &self.params);
        let result = match config.query_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, future).await {
                Ok(result) => result,
                Err(_) => Err(QueryError::Timeout(timeout)),
            },
            None => future.await,
        };
        let elapsed = start.elapsed();

        match &result {
            Ok(rows) => {
                if config.logging_enabled {
                    tracing::debug!(
                        target: "querycraft.sql",
                        elapsed_ms = elapsed.as_millis() as u64,
                        rows = rows.len(),
                        "query completed"
                    );
                }
                if let Some(threshold) = config.slow_query_threshold
                    && elapsed > threshold
                {
                    tracing::warn!(
                        target: "querycraft.sql",
                        sql = %sql,
                        elapsed_ms = elapsed.as_millis() as u64,
                        threshold_ms = threshold.as_millis() as u64,
                        "slow query"
                    );
                }
            }
            Err(error) => {
                tracing::error!(
                    target: "querycraft.sql",
                    sql = %sql,
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %error,
                    "query failed"
                );
            }
        }

        result
    }

    /// All result rows.
    pub async fn query_all(&self) -> QueryResult<Vec<Row>> {
        Ok(self.execute().await?.rows)
    }

    /// The first result row, if any.
    pub async fn query_one(&self) -> QueryResult<Option<Row>> {
        Ok(self.execute().await?.rows.into_iter().next())
    }

    /// First column of every row.
    pub async fn query_column(&self) -> QueryResult<Vec<Value>> {
        Ok(self
            .execute()
            .await?
            .rows
            .into_iter()
            .filter_map(|row| row.into_values().into_iter().next())
            .collect())
    }

    /// First column of the first row.
    pub async fn query_scalar(&self) -> QueryResult<Option<Value>> {
        Ok(self
            .query_one()
            .await?
            .and_then(|row| row.into_values().into_iter().next()))
    }
}
