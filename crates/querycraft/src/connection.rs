//! Dialect, executor and settings bundled for running queries.

use crate::builder::QueryBuilder;
use crate::client::Executor;
use crate::command::Command;
use crate::config::ConnectionConfig;
use crate::dialect::{Dialect, Postgres};
use crate::error::QueryResult;
use crate::params::Params;
use crate::query::Query;
use std::sync::Arc;

/// A backend connection as seen by the query layer.
///
/// Holds the dialect used to compile queries and the [`Executor`] that runs
/// them. Pass it explicitly to the terminal accessors on [`Query`].
///
/// # Example
/// ```ignore
/// use querycraft::{Condition, Connection, Query};
///
/// let conn = Connection::postgres(client);
/// let rows = Query::new()
///     .from("users")
///     .where_(Condition::eq("status", "active"))
///     .all(&conn)
///     .await?;
/// ```
pub struct Connection<E> {
    dialect: Arc<dyn Dialect>,
    executor: E,
    config: ConnectionConfig,
}

impl<E> std::fmt::Debug for Connection<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("dialect", &self.dialect.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: Executor> Connection<E> {
    pub fn new(dialect: impl Dialect + 'static, executor: E) -> Self {
        Self::with_config(dialect, executor, ConnectionConfig::default())
    }

    pub fn with_config(
        dialect: impl Dialect + 'static,
        executor: E,
        config: ConnectionConfig,
    ) -> Self {
        Self {
            dialect: Arc::new(dialect),
            executor,
            config,
        }
    }

    /// Share one dialect instance between connections.
    pub fn with_shared_dialect(dialect: Arc<dyn Dialect>, executor: E) -> Self {
        Self {
            dialect,
            executor,
            config: ConnectionConfig::default(),
        }
    }

    /// PostgreSQL connection with default settings.
    pub fn postgres(executor: E) -> Self {
        Self::new(Postgres, executor)
    }

    /// Replace the execution settings.
    pub fn config_mut(&mut self) -> &mut ConnectionConfig {
        &mut self.config
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Compiler for this connection's dialect.
    pub fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self.dialect.as_ref())
    }

    /// Compile `query` into a runnable command.
    pub fn create_command(&self, query: &Query) -> QueryResult<Command<'_, E>> {
        let (sql, params) = self.query_builder().build(query, Params::new())?;
        Ok(Command::new(self, sql, params))
    }

    /// Command from hand-written SQL with `:name` placeholders.
    pub fn command(&self, sql: impl Into<String>, params: Params) -> Command<'_, E> {
        Command::new(self, sql, params)
    }
}
