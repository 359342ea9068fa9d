//! Condition model for WHERE / HAVING / JOIN ... ON clauses.
//!
//! A [`Condition`] is one of three shapes:
//!
//! - a *hash* condition: column → value pairs, AND-ed together
//! - an *operator* condition: an [`Operator`] applied to [`Operand`]s
//! - a *raw* SQL fragment inserted verbatim
//!
//! Operator conditions nest arbitrarily. The typed constructors below always
//! produce the right number of operands; [`Condition::op`] accepts any operator
//! text and operand list and leaves arity checks to compilation.
//!
//! # Example
//! ```ignore
//! use querycraft::{Condition, Query};
//!
//! let active = Condition::hash([("status", "active")]);
//! let recent = Condition::compare(">", "created_at", "2024-01-01");
//! let cond = Condition::and([active, recent, Condition::in_list("role", ["admin", "staff"])]);
//! ```

use crate::error::{QueryError, QueryResult};
use crate::query::Query;
use crate::value::Value;

/// Structured boolean predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `col = value` pairs joined with AND. Null values become `IS NULL`,
    /// lists and subqueries become IN.
    Hash(Vec<(String, HashValue)>),
    /// Operator applied to operands.
    Operator {
        operator: Operator,
        operands: Vec<Operand>,
    },
    /// Raw SQL, inserted verbatim.
    Raw(String),
}

/// Right-hand side of a hash-condition pair.
#[derive(Debug, Clone, PartialEq)]
pub enum HashValue {
    Value(Value),
    List(Vec<Value>),
    Query(Box<Query>),
}

impl From<Value> for HashValue {
    fn from(v: Value) -> Self {
        HashValue::Value(v)
    }
}

impl From<Query> for HashValue {
    fn from(q: Query) -> Self {
        HashValue::Query(Box::new(q))
    }
}

impl<T: Into<Value>> From<Vec<T>> for HashValue {
    fn from(values: Vec<T>) -> Self {
        HashValue::List(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_hash_value_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for HashValue {
                fn from(v: $ty) -> Self {
                    HashValue::Value(v.into())
                }
            }
        )*
    };
}

impl_hash_value_scalar!(
    bool,
    i16,
    i32,
    i64,
    u32,
    f32,
    f64,
    &str,
    String,
    rust_decimal::Decimal,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::NaiveTime,
    chrono::DateTime<chrono::Utc>,
    uuid::Uuid,
    serde_json::Value,
);

impl<T: Into<Value>> From<Option<T>> for HashValue {
    fn from(v: Option<T>) -> Self {
        HashValue::Value(v.into())
    }
}

/// AND / OR joiner of a LIKE-family operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeJoiner {
    #[default]
    And,
    Or,
}

impl LikeJoiner {
    pub fn as_sql(&self) -> &'static str {
        match self {
            LikeJoiner::And => "AND",
            LikeJoiner::Or => "OR",
        }
    }
}

/// Parsed LIKE-family operator, e.g. `OR NOT LIKE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeOp {
    pub joiner: LikeJoiner,
    pub negated: bool,
    pub case_insensitive: bool,
}

impl LikeOp {
    /// Parse operator text of the form `[AND |OR ][NOT ][I]LIKE`.
    pub fn parse(text: &str) -> QueryResult<Self> {
        let upper = text.to_uppercase();
        let (joiner, rest) = if let Some(rest) = upper.strip_prefix("AND ") {
            (LikeJoiner::And, rest)
        } else if let Some(rest) = upper.strip_prefix("OR ") {
            (LikeJoiner::Or, rest)
        } else {
            (LikeJoiner::And, upper.as_str())
        };
        let (negated, rest) = match rest.strip_prefix("NOT ") {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let case_insensitive = match rest {
            "LIKE" => false,
            "ILIKE" => true,
            _ => return Err(QueryError::InvalidOperator(text.to_string())),
        };
        Ok(Self {
            joiner,
            negated,
            case_insensitive,
        })
    }

    /// The comparison keyword without the joiner, e.g. `NOT ILIKE`.
    pub fn keyword(&self) -> &'static str {
        match (self.negated, self.case_insensitive) {
            (false, false) => "LIKE",
            (true, false) => "NOT LIKE",
            (false, true) => "ILIKE",
            (true, true) => "NOT ILIKE",
        }
    }
}

/// Condition operator.
///
/// Unknown operator text becomes [`Operator::Compare`], compiled as a generic
/// binary comparison (`col OP value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
    Between,
    NotBetween,
    In,
    NotIn,
    Like(LikeOp),
    Exists,
    NotExists,
    Compare(String),
}

impl Operator {
    /// Map operator text (case-insensitive) to an operator.
    pub fn parse(text: &str) -> Self {
        let upper = text.to_uppercase();
        match upper.as_str() {
            "AND" => Operator::And,
            "OR" => Operator::Or,
            "NOT" => Operator::Not,
            "BETWEEN" => Operator::Between,
            "NOT BETWEEN" => Operator::NotBetween,
            "IN" => Operator::In,
            "NOT IN" => Operator::NotIn,
            "EXISTS" => Operator::Exists,
            "NOT EXISTS" => Operator::NotExists,
            "LIKE" | "NOT LIKE" | "OR LIKE" | "OR NOT LIKE" | "ILIKE" | "NOT ILIKE"
            | "OR ILIKE" | "OR NOT ILIKE" => match LikeOp::parse(&upper) {
                Ok(op) => Operator::Like(op),
                Err(_) => Operator::Compare(upper),
            },
            _ => Operator::Compare(upper),
        }
    }

    /// SQL keyword written between operands.
    pub fn as_sql(&self) -> &str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Like(op) => op.keyword(),
            Operator::Exists => "EXISTS",
            Operator::NotExists => "NOT EXISTS",
            Operator::Compare(op) => op,
        }
    }
}

/// How LIKE values are escaped before binding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LikeEscape {
    /// Escape `%`, `_` and `\` and wrap the value in `%...%`.
    #[default]
    Default,
    /// Custom replacement pairs, value wrapped in `%...%`. An empty map
    /// behaves like [`LikeEscape::None`].
    Custom(Vec<(String, String)>),
    /// Values are already patterns: bind as-is.
    None,
}

impl LikeEscape {
    /// Apply the escape map. Replacements are simultaneous and prefer the
    /// longest matching key, so replaced text is never escaped twice.
    pub fn apply(&self, value: &str) -> String {
        if self.is_raw() {
            return value.to_string();
        }
        let pairs: Vec<(&str, &str)> = match self {
            LikeEscape::None => return value.to_string(),
            LikeEscape::Default => vec![("%", "\\%"), ("_", "\\_"), ("\\", "\\\\")],
            LikeEscape::Custom(pairs) => pairs
                .iter()
                .filter(|(from, _)| !from.is_empty())
                .map(|(from, to)| (from.as_str(), to.as_str()))
                .collect(),
        };
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(c) = rest.chars().next() {
            let hit = pairs
                .iter()
                .filter(|(from, _)| rest.starts_with(from))
                .max_by_key(|(from, _)| from.len());
            match hit {
                Some((from, to)) => {
                    out.push_str(to);
                    rest = &rest[from.len()..];
                }
                None => {
                    out.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        out
    }

    /// Whether values are taken as ready-made patterns (no escaping, no `%` wrap).
    pub fn is_raw(&self) -> bool {
        match self {
            LikeEscape::Default => false,
            LikeEscape::Custom(pairs) => pairs.iter().all(|(from, _)| from.is_empty()),
            LikeEscape::None => true,
        }
    }

    pub fn wraps(&self) -> bool {
        !self.is_raw()
    }
}

/// Operand of an operator condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Nested condition (AND / OR / NOT operands).
    Condition(Condition),
    /// Column name or raw SQL text. In value position it is bound as a string.
    Expr(String),
    /// Column list for composite IN.
    Columns(Vec<String>),
    /// Single bound value.
    Value(Value),
    /// List of bound values.
    Values(Vec<Value>),
    /// Value rows keyed by column name (composite IN).
    Rows(Vec<Vec<(String, Value)>>),
    /// Subquery.
    Query(Box<Query>),
    /// LIKE escape map.
    Escape(LikeEscape),
}

impl From<Condition> for Operand {
    fn from(c: Condition) -> Self {
        Operand::Condition(c)
    }
}

impl From<Query> for Operand {
    fn from(q: Query) -> Self {
        Operand::Query(Box::new(q))
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Expr(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Expr(s)
    }
}

impl From<LikeEscape> for Operand {
    fn from(e: LikeEscape) -> Self {
        Operand::Escape(e)
    }
}

fn values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Operand {
    Operand::Values(values.into_iter().map(Into::into).collect())
}

impl Condition {
    /// Generic operator condition; arity is checked when compiled.
    pub fn op(operator: &str, operands: impl IntoIterator<Item = Operand>) -> Self {
        Condition::Operator {
            operator: Operator::parse(operator),
            operands: operands.into_iter().collect(),
        }
    }

    fn with(operator: Operator, operands: Vec<Operand>) -> Self {
        Condition::Operator { operator, operands }
    }

    /// Hash condition from column → value pairs.
    pub fn hash<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<HashValue>,
    {
        Condition::Hash(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// `col = value` (or `col IS NULL` for a null value).
    pub fn eq(column: impl Into<String>, value: impl Into<HashValue>) -> Self {
        Condition::Hash(vec![(column.into(), value.into())])
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::with(
            Operator::And,
            conditions.into_iter().map(Operand::Condition).collect(),
        )
    }

    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::with(
            Operator::Or,
            conditions.into_iter().map(Operand::Condition).collect(),
        )
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Self::with(Operator::Not, vec![Operand::Condition(condition)])
    }

    /// Generic binary comparison: `col OP value`.
    pub fn compare(op: &str, column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with(
            Operator::Compare(op.to_uppercase()),
            vec![Operand::Expr(column.into()), Operand::Value(value.into())],
        )
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare("<>", column, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(">", column, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(">=", column, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare("<", column, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare("<=", column, value)
    }

    /// `col OP (subquery)`.
    pub fn compare_query(op: &str, column: impl Into<String>, query: Query) -> Self {
        Self::with(
            Operator::Compare(op.to_uppercase()),
            vec![Operand::Expr(column.into()), Operand::Query(Box::new(query))],
        )
    }

    pub fn between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::with(
            Operator::Between,
            vec![
                Operand::Expr(column.into()),
                Operand::Value(low.into()),
                Operand::Value(high.into()),
            ],
        )
    }

    pub fn not_between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::with(
            Operator::NotBetween,
            vec![
                Operand::Expr(column.into()),
                Operand::Value(low.into()),
                Operand::Value(high.into()),
            ],
        )
    }

    pub fn in_list<V: Into<Value>>(
        column: impl Into<String>,
        list: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::with(Operator::In, vec![Operand::Expr(column.into()), values(list)])
    }

    pub fn not_in<V: Into<Value>>(
        column: impl Into<String>,
        list: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::with(
            Operator::NotIn,
            vec![Operand::Expr(column.into()), values(list)],
        )
    }

    /// `col IN (subquery)`.
    pub fn in_query(column: impl Into<String>, query: Query) -> Self {
        Self::with(
            Operator::In,
            vec![Operand::Expr(column.into()), Operand::Query(Box::new(query))],
        )
    }

    /// `col NOT IN (subquery)`.
    pub fn not_in_query(column: impl Into<String>, query: Query) -> Self {
        Self::with(
            Operator::NotIn,
            vec![Operand::Expr(column.into()), Operand::Query(Box::new(query))],
        )
    }

    /// Composite IN: `(a, b) IN ((..), (..))`. Missing row keys bind as NULL.
    pub fn in_rows<C, K, V>(
        columns: impl IntoIterator<Item = C>,
        rows: impl IntoIterator<Item = Vec<(K, V)>>,
    ) -> Self
    where
        C: Into<String>,
        K: Into<String>,
        V: Into<Value>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            .collect();
        Self::with(
            Operator::In,
            vec![
                Operand::Columns(columns.into_iter().map(Into::into).collect()),
                Operand::Rows(rows),
            ],
        )
    }

    pub fn like<V: Into<Value>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::like_with(LikeOp::default(), column, patterns, LikeEscape::Default)
    }

    pub fn not_like<V: Into<Value>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = V>,
    ) -> Self {
        let op = LikeOp {
            negated: true,
            ..LikeOp::default()
        };
        Self::like_with(op, column, patterns, LikeEscape::Default)
    }

    pub fn or_like<V: Into<Value>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = V>,
    ) -> Self {
        let op = LikeOp {
            joiner: LikeJoiner::Or,
            ..LikeOp::default()
        };
        Self::like_with(op, column, patterns, LikeEscape::Default)
    }

    pub fn or_not_like<V: Into<Value>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = V>,
    ) -> Self {
        let op = LikeOp {
            joiner: LikeJoiner::Or,
            negated: true,
            case_insensitive: false,
        };
        Self::like_with(op, column, patterns, LikeEscape::Default)
    }

    /// Fully specified LIKE-family condition.
    pub fn like_with<V: Into<Value>>(
        op: LikeOp,
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = V>,
        escape: LikeEscape,
    ) -> Self {
        Self::with(
            Operator::Like(op),
            vec![
                Operand::Expr(column.into()),
                values(patterns),
                Operand::Escape(escape),
            ],
        )
    }

    pub fn exists(query: Query) -> Self {
        Self::with(Operator::Exists, vec![Operand::Query(Box::new(query))])
    }

    pub fn not_exists(query: Query) -> Self {
        Self::with(Operator::NotExists, vec![Operand::Query(Box::new(query))])
    }

    /// Whether the condition compiles to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Hash(pairs) => pairs.is_empty(),
            Condition::Raw(sql) => sql.is_empty(),
            Condition::Operator { .. } => false,
        }
    }
}

impl From<&str> for Condition {
    fn from(sql: &str) -> Self {
        Condition::Raw(sql.to_string())
    }
}

impl From<String> for Condition {
    fn from(sql: String) -> Self {
        Condition::Raw(sql)
    }
}
