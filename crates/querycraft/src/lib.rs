//! # querycraft
//!
//! A dialect-aware SQL query builder.
//!
//! ## Features
//!
//! - **Structured queries**: build SELECTs with [`Query`] and nested [`Condition`]s
//! - **Parameterized output**: every literal becomes a `:qp<N>` placeholder with its value in [`Params`]
//! - **Dialects**: identifier quoting and type maps for MySQL and PostgreSQL via the [`Dialect`] trait
//! - **DDL helpers**: `CREATE TABLE`, indexes, keys and column changes on [`QueryBuilder`]
//! - **Execution**: run compiled queries through any [`Executor`], with a PostgreSQL executor bundled
//!
//! ## Building queries
//!
//! ```ignore
//! use querycraft::{Condition, MySql, Params, Query, QueryBuilder};
//!
//! let query = Query::new()
//!     .select("id, name")
//!     .from("user")
//!     .where_(Condition::eq("status", "active"))
//!     .and_where(Condition::in_list("role", ["admin", "staff"]))
//!     .order_by("name asc")
//!     .limit(10);
//!
//! let (sql, params) = QueryBuilder::new(&MySql).build(&query, Params::new())?;
//! // SELECT `id`, `name` FROM `user` WHERE (`status`=:qp0) AND (`role` IN (:qp1, :qp2))
//! //   ORDER BY `name` LIMIT 10
//! ```
//!
//! ## Running queries
//!
//! ```ignore
//! use querycraft::{Connection, Query};
//!
//! let conn = Connection::postgres(client);
//! let rows = query.all(&conn).await?;
//! let total = query.count("*", &conn).await?;
//! ```

pub mod builder;
pub mod client;
pub mod column_type;
pub mod command;
pub mod condition;
pub mod config;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod params;
pub mod query;
pub mod value;

mod types;

pub use builder::QueryBuilder;
pub use client::{Executor, Field, ResultSet, Row};
pub use column_type::ColumnType;
pub use command::Command;
pub use condition::{Condition, HashValue, LikeEscape, LikeJoiner, LikeOp, Operand, Operator};
pub use config::ConnectionConfig;
pub use connection::Connection;
pub use dialect::{Dialect, MySql, Postgres};
pub use error::{QueryError, QueryResult};
pub use params::{PARAM_PREFIX, Params, PlaceholderAllocator, PlaceholderStyle};
pub use query::{ColumnSpec, Query, SortOrder, TableSpec};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
