//! Abstract column types used by DDL helpers.

use crate::error::QueryError;
use std::fmt;
use std::str::FromStr;

/// Backend-independent column type token, mapped to a physical type by each
/// [`Dialect`](crate::dialect::Dialect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Pk,
    BigPk,
    String,
    Text,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    DateTime,
    Timestamp,
    Time,
    Date,
    Binary,
    Boolean,
    Money,
}

impl ColumnType {
    pub const ALL: [ColumnType; 17] = [
        ColumnType::Pk,
        ColumnType::BigPk,
        ColumnType::String,
        ColumnType::Text,
        ColumnType::SmallInt,
        ColumnType::Integer,
        ColumnType::BigInt,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Decimal,
        ColumnType::DateTime,
        ColumnType::Timestamp,
        ColumnType::Time,
        ColumnType::Date,
        ColumnType::Binary,
        ColumnType::Boolean,
        ColumnType::Money,
    ];

    /// The token as written in column definitions, e.g. `"bigpk"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Pk => "pk",
            ColumnType::BigPk => "bigpk",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::SmallInt => "smallint",
            ColumnType::Integer => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Decimal => "decimal",
            ColumnType::DateTime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Time => "time",
            ColumnType::Date => "date",
            ColumnType::Binary => "binary",
            ColumnType::Boolean => "boolean",
            ColumnType::Money => "money",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| QueryError::validation(format!("unknown column type: {s}")))
    }
}
