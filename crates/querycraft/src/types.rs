//! PostgreSQL wire conversions for [`Value`].

use crate::client::{Field, ResultSet, Row};
use crate::error::{QueryError, QueryResult};
use crate::value::Value;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::error::Error;
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type};

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql_checked(ty, out),
            // Integers are stored widened; narrow to the column's width.
            Value::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)?.to_sql_checked(ty, out),
                Type::INT4 => i32::try_from(*i)?.to_sql_checked(ty, out),
                Type::OID => u32::try_from(*i)?.to_sql_checked(ty, out),
                Type::FLOAT4 => (*i as f32).to_sql_checked(ty, out),
                Type::FLOAT8 => (*i as f64).to_sql_checked(ty, out),
                Type::NUMERIC => Decimal::from(*i).to_sql_checked(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => i.to_string().to_sql_checked(ty, out),
                _ => i.to_sql_checked(ty, out),
            },
            Value::Float(f) => match *ty {
                Type::FLOAT4 => (*f as f32).to_sql_checked(ty, out),
                Type::NUMERIC => Decimal::try_from(*f)?.to_sql_checked(ty, out),
                _ => f.to_sql_checked(ty, out),
            },
            Value::Decimal(d) => d.to_sql_checked(ty, out),
            Value::String(s) => s.to_sql_checked(ty, out),
            Value::Bytes(b) => b.as_slice().to_sql_checked(ty, out),
            Value::Date(d) => d.to_sql_checked(ty, out),
            Value::DateTime(dt) => dt.to_sql_checked(ty, out),
            Value::DateTimeTz(dt) => dt.to_sql_checked(ty, out),
            Value::Time(t) => t.to_sql_checked(ty, out),
            Value::Uuid(u) => u.to_sql_checked(ty, out),
            Value::Json(j) => j.to_sql_checked(ty, out),
        }
    }

    // Each variant checks `ty` against its wrapped type in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

/// Column metadata from a prepared statement.
pub(crate) fn fields_of(columns: &[tokio_postgres::Column]) -> Vec<Field> {
    columns
        .iter()
        .map(|column| Field {
            name: column.name().to_string(),
            type_name: column.type_().name().to_string(),
        })
        .collect()
}

/// Decode driver rows into a [`ResultSet`].
pub(crate) fn decode_rows(
    fields: Vec<Field>,
    rows: &[tokio_postgres::Row],
) -> QueryResult<ResultSet> {
    let rows = rows.iter().map(decode_row).collect::<QueryResult<Vec<_>>>()?;
    Ok(ResultSet { rows, fields })
}

fn decode_row(row: &tokio_postgres::Row) -> QueryResult<Row> {
    let values = row
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = decode_value(row, idx, column.name(), column.type_())?;
            Ok((column.name().to_string(), value))
        })
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(Row::new(values))
}

fn get<'a, T: FromSql<'a>>(
    row: &'a tokio_postgres::Row,
    idx: usize,
    name: &str,
) -> QueryResult<Option<T>> {
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| QueryError::decode(name, e.to_string()))
}

fn decode_value(
    row: &tokio_postgres::Row,
    idx: usize,
    name: &str,
    ty: &Type,
) -> QueryResult<Value> {
    let value = match *ty {
        Type::BOOL => get::<bool>(row, idx, name)?.map(Value::Bool),
        Type::INT2 => get::<i16>(row, idx, name)?.map(|v| Value::Int(v.into())),
        Type::INT4 => get::<i32>(row, idx, name)?.map(|v| Value::Int(v.into())),
        Type::INT8 => get::<i64>(row, idx, name)?.map(Value::Int),
        Type::OID => get::<u32>(row, idx, name)?.map(|v| Value::Int(v.into())),
        Type::FLOAT4 => get::<f32>(row, idx, name)?.map(|v| Value::Float(v.into())),
        Type::FLOAT8 => get::<f64>(row, idx, name)?.map(Value::Float),
        Type::NUMERIC => get::<Decimal>(row, idx, name)?.map(Value::Decimal),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            get::<String>(row, idx, name)?.map(Value::String)
        }
        Type::BYTEA => get::<Vec<u8>>(row, idx, name)?.map(Value::Bytes),
        Type::DATE => get::<NaiveDate>(row, idx, name)?.map(Value::Date),
        Type::TIMESTAMP => get::<NaiveDateTime>(row, idx, name)?.map(Value::DateTime),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, idx, name)?.map(Value::DateTimeTz),
        Type::TIME => get::<NaiveTime>(row, idx, name)?.map(Value::Time),
        Type::UUID => get::<uuid::Uuid>(row, idx, name)?.map(Value::Uuid),
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, idx, name)?.map(Value::Json),
        _ => {
            return Err(QueryError::decode(
                name,
                format!("unsupported column type '{ty}'"),
            ));
        }
    };
    Ok(value.unwrap_or(Value::Null))
}
