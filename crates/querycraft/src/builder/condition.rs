//! Condition compilation.

use super::QueryBuilder;
use crate::condition::{Condition, HashValue, LikeEscape, LikeOp, Operand, Operator};
use crate::error::{QueryError, QueryResult};
use crate::params::PlaceholderAllocator;
use crate::query::Query;
use crate::value::Value;

/// Column operand: a single name or a list for composite IN.
fn column_of<'a>(operator: &Operator, operand: &'a Operand) -> QueryResult<&'a str> {
    match operand {
        Operand::Expr(column) => Ok(column),
        Operand::Columns(columns) if columns.len() == 1 => Ok(&columns[0]),
        _ => Err(QueryError::invalid_operand(
            operator.as_sql(),
            "expected a column name",
        )),
    }
}

/// Scalar operand in value position. Text binds as a string.
fn value_of(operator: &Operator, operand: &Operand) -> QueryResult<Value> {
    match operand {
        Operand::Value(value) => Ok(value.clone()),
        Operand::Expr(text) => Ok(Value::String(text.clone())),
        _ => Err(QueryError::invalid_operand(
            operator.as_sql(),
            "expected a scalar value",
        )),
    }
}

fn empty_in(operator: &Operator) -> String {
    match operator {
        Operator::NotIn => String::new(),
        _ => "0=1".to_string(),
    }
}

impl QueryBuilder<'_> {
    /// Compile a condition into a boolean SQL expression.
    ///
    /// Returns an empty string for an empty condition; callers drop the
    /// surrounding clause in that case.
    pub fn build_condition(
        &self,
        condition: &Condition,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        match condition {
            Condition::Raw(sql) => Ok(sql.clone()),
            Condition::Hash(pairs) => self.build_hash_condition(pairs, alloc),
            Condition::Operator { operator, operands } => match operator {
                Operator::And | Operator::Or => self.build_and_condition(operator, operands, alloc),
                Operator::Not => self.build_not_condition(operator, operands, alloc),
                Operator::Between | Operator::NotBetween => {
                    self.build_between_condition(operator, operands, alloc)
                }
                Operator::In | Operator::NotIn => self.build_in_condition(operator, operands, alloc),
                Operator::Like(op) => self.build_like_condition(operator, *op, operands, alloc),
                Operator::Exists | Operator::NotExists => {
                    self.build_exists_condition(operator, operands, alloc)
                }
                Operator::Compare(_) => self.build_simple_condition(operator, operands, alloc),
            },
        }
    }

    /// `col=:qpN` pairs, `col IS NULL` for nulls, IN for lists and subqueries.
    /// More than one pair is rendered as `(p1) AND (p2) ...`.
    pub fn build_hash_condition(
        &self,
        pairs: &[(String, HashValue)],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let mut parts = Vec::with_capacity(pairs.len());
        for (column, value) in pairs {
            let part = match value {
                HashValue::List(values) => {
                    self.build_in_values(&Operator::In, column, values, alloc)
                }
                HashValue::Query(query) => {
                    self.build_subquery_in_condition(&Operator::In, &[column.clone()], query, alloc)?
                }
                HashValue::Value(Value::Null) => format!("{} IS NULL", self.quote_column(column)),
                HashValue::Value(value) => {
                    let ph = alloc.bind(value.clone());
                    format!("{}={ph}", self.quote_column(column))
                }
            };
            parts.push(part);
        }
        Ok(match parts.len() {
            0 => String::new(),
            1 => parts.remove(0),
            _ => format!("({})", parts.join(") AND (")),
        })
    }

    pub fn build_and_condition(
        &self,
        operator: &Operator,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let mut parts = Vec::with_capacity(operands.len());
        for operand in operands {
            let part = match operand {
                Operand::Condition(condition) => self.build_condition(condition, alloc)?,
                Operand::Expr(sql) => sql.clone(),
                _ => {
                    return Err(QueryError::invalid_operand(
                        operator.as_sql(),
                        "operands must be conditions",
                    ));
                }
            };
            if !part.is_empty() {
                parts.push(part);
            }
        }
        if parts.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(
            "({})",
            parts.join(&format!(") {} (", operator.as_sql()))
        ))
    }

    pub fn build_not_condition(
        &self,
        operator: &Operator,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let [operand] = operands else {
            return Err(QueryError::arity(operator.as_sql(), "exactly one operand"));
        };
        let operand = match operand {
            Operand::Condition(condition) => self.build_condition(condition, alloc)?,
            Operand::Expr(sql) => sql.clone(),
            _ => {
                return Err(QueryError::invalid_operand(
                    operator.as_sql(),
                    "operand must be a condition",
                ));
            }
        };
        if operand.is_empty() {
            return Ok(operand);
        }
        Ok(format!("{} ({operand})", operator.as_sql()))
    }

    pub fn build_between_condition(
        &self,
        operator: &Operator,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let [column, low, high] = operands else {
            return Err(QueryError::arity(operator.as_sql(), "three operands"));
        };
        let column = self.quote_column(column_of(operator, column)?);
        let low = value_of(operator, low)?;
        let high = value_of(operator, high)?;
        let ph_low = alloc.bind(low);
        let ph_high = alloc.bind(high);
        Ok(format!(
            "{column} {} {ph_low} AND {ph_high}",
            operator.as_sql()
        ))
    }

    pub fn build_in_condition(
        &self,
        operator: &Operator,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let [column, values] = operands else {
            return Err(QueryError::arity(operator.as_sql(), "two operands"));
        };
        let columns = match column {
            Operand::Expr(column) => vec![column.clone()],
            Operand::Columns(columns) => columns.clone(),
            _ => {
                return Err(QueryError::invalid_operand(
                    operator.as_sql(),
                    "expected a column name or a list of column names",
                ));
            }
        };

        let no_values = match values {
            Operand::Values(values) => values.is_empty(),
            Operand::Rows(rows) => rows.is_empty(),
            _ => false,
        };
        if columns.is_empty() || no_values {
            return Ok(empty_in(operator));
        }

        if let Operand::Query(query) = values {
            return self.build_subquery_in_condition(operator, &columns, query, alloc);
        }

        if columns.len() > 1 {
            return match values {
                Operand::Rows(rows) => {
                    Ok(self.build_composite_in_condition(operator, &columns, rows, alloc))
                }
                _ => Err(QueryError::invalid_operand(
                    operator.as_sql(),
                    "composite IN expects rows keyed by column",
                )),
            };
        }

        let column = &columns[0];
        let values: Vec<Value> = match values {
            Operand::Values(values) => values.clone(),
            Operand::Value(value) => vec![value.clone()],
            Operand::Expr(text) => vec![Value::String(text.clone())],
            Operand::Rows(rows) => rows
                .iter()
                .map(|row| {
                    row.iter()
                        .find(|(key, _)| key == column)
                        .map_or(Value::Null, |(_, value)| value.clone())
                })
                .collect(),
            _ => {
                return Err(QueryError::invalid_operand(
                    operator.as_sql(),
                    "expected a list of values or a subquery",
                ));
            }
        };
        Ok(self.build_in_values(operator, column, &values, alloc))
    }

    /// Single-column IN over literal values. One value collapses to `=` / `<>`;
    /// null entries render as a literal `NULL`.
    fn build_in_values(
        &self,
        operator: &Operator,
        column: &str,
        values: &[Value],
        alloc: &mut PlaceholderAllocator,
    ) -> String {
        if values.is_empty() {
            return empty_in(operator);
        }
        let column = self.quote_column(column);
        let negated = matches!(operator, Operator::NotIn);

        if let [value] = values {
            let value = if value.is_null() {
                "NULL".to_string()
            } else {
                alloc.bind(value.clone())
            };
            let op = if negated { "<>" } else { "=" };
            return format!("{column}{op}{value}");
        }

        let placeholders = values
            .iter()
            .map(|value| {
                if value.is_null() {
                    "NULL".to_string()
                } else {
                    alloc.bind(value.clone())
                }
            })
            .collect::<Vec<_>>();
        format!("{column} {} ({})", operator.as_sql(), placeholders.join(", "))
    }

    pub fn build_subquery_in_condition(
        &self,
        operator: &Operator,
        columns: &[String],
        query: &Query,
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let sql = self.compile(query, alloc)?;
        let op = operator.as_sql();
        Ok(match columns {
            [column] => format!("{} {op} ({sql})", self.quote_column(column)),
            _ => format!("({}) {op} ({sql})", self.build_columns(columns)),
        })
    }

    /// `(a, b) IN ((:qp0, :qp1), ...)`; row keys missing a column render NULL.
    pub fn build_composite_in_condition(
        &self,
        operator: &Operator,
        columns: &[String],
        rows: &[Vec<(String, Value)>],
        alloc: &mut PlaceholderAllocator,
    ) -> String {
        let tuples = rows
            .iter()
            .map(|row| {
                let values = columns
                    .iter()
                    .map(|column| match row.iter().find(|(key, _)| key == column) {
                        Some((_, value)) if !value.is_null() => alloc.bind(value.clone()),
                        _ => "NULL".to_string(),
                    })
                    .collect::<Vec<_>>();
                format!("({})", values.join(", "))
            })
            .collect::<Vec<_>>();
        format!(
            "({}) {} ({})",
            self.build_columns(columns),
            operator.as_sql(),
            tuples.join(", ")
        )
    }

    pub fn build_like_condition(
        &self,
        operator: &Operator,
        op: LikeOp,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let (column, values, escape) = match operands {
            [column, values] => (column, values, LikeEscape::Default),
            [column, values, Operand::Escape(escape)] => (column, values, escape.clone()),
            [_, _, _] => {
                return Err(QueryError::invalid_operand(
                    operator.as_sql(),
                    "third operand must be an escape map",
                ));
            }
            _ => return Err(QueryError::arity(operator.as_sql(), "two operands")),
        };
        let column = self.quote_column(column_of(operator, column)?);
        let values = match values {
            Operand::Values(values) => values.clone(),
            Operand::Value(value) => vec![value.clone()],
            Operand::Expr(text) => vec![Value::String(text.clone())],
            _ => {
                return Err(QueryError::invalid_operand(
                    operator.as_sql(),
                    "expected a pattern or a list of patterns",
                ));
            }
        };

        if values.is_empty() {
            return Ok(if op.negated {
                String::new()
            } else {
                "0=1".to_string()
            });
        }

        let keyword = op.keyword();
        let parts = values
            .into_iter()
            .map(|value| {
                let bound = if escape.wraps() {
                    Value::String(format!("%{}%", escape.apply(&value.to_string())))
                } else {
                    value
                };
                format!("{column} {keyword} {}", alloc.bind(bound))
            })
            .collect::<Vec<_>>();
        Ok(parts.join(&format!(" {} ", op.joiner.as_sql())))
    }

    pub fn build_exists_condition(
        &self,
        operator: &Operator,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let [operand] = operands else {
            return Err(QueryError::arity(operator.as_sql(), "exactly one operand"));
        };
        let Operand::Query(query) = operand else {
            return Err(QueryError::invalid_operand(
                operator.as_sql(),
                "operand must be a subquery",
            ));
        };
        let sql = self.compile(query, alloc)?;
        Ok(format!("{} ({sql})", operator.as_sql()))
    }

    /// Generic binary comparison: `col OP :qpN`, `col OP NULL` or
    /// `col OP (subquery)`.
    pub fn build_simple_condition(
        &self,
        operator: &Operator,
        operands: &[Operand],
        alloc: &mut PlaceholderAllocator,
    ) -> QueryResult<String> {
        let [column, value] = operands else {
            return Err(QueryError::arity(operator.as_sql(), "two operands"));
        };
        let column = self.quote_column(column_of(operator, column)?);
        let op = operator.as_sql();
        Ok(match value {
            Operand::Query(query) => {
                let sql = self.compile(query, alloc)?;
                format!("{column} {op} ({sql})")
            }
            Operand::Value(Value::Null) => format!("{column} {op} NULL"),
            other => {
                let value = value_of(operator, other)?;
                format!("{column} {op} {}", alloc.bind(value))
            }
        })
    }
}
