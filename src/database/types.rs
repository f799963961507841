//! SQL value representation and type mapping.
//!
//! Every cell read from the warehouse is converted into [`SqlValue`], a
//! closed union over the value kinds the server can return. Serialization is
//! untagged, so result rows come out as natural JSON (`null`, numbers,
//! strings, booleans) rather than wrapper objects.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio_postgres::types::Type;
use tokio_postgres::{Column, Row};
use tracing::{debug, warn};

/// A single cell value from a query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// BOOLEAN
    Bool(bool),
    /// SMALLINT
    SmallInt(i16),
    /// INTEGER
    Int(i32),
    /// BIGINT
    BigInt(i64),
    /// REAL
    Float(f32),
    /// DOUBLE PRECISION
    Double(f64),
    /// NUMERIC / DECIMAL, serialized as a string to preserve precision
    Decimal(Decimal),
    /// Character types (TEXT, VARCHAR, CHAR, NAME)
    Text(String),
    /// BYTEA, serialized as a `\x`-prefixed hex string
    Bytes(#[serde(with = "hex")] Vec<u8>),
    /// UUID
    Uuid(uuid::Uuid),
    /// DATE
    Date(NaiveDate),
    /// TIME
    Time(NaiveTime),
    /// TIMESTAMP (no time zone)
    Timestamp(NaiveDateTime),
    /// TIMESTAMPTZ
    TimestampTz(DateTime<Utc>),
    /// JSON / JSONB
    Json(serde_json::Value),
}

impl SqlValue {
    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// Converts driver rows and columns into [`SqlValue`]s and type names.
pub struct TypeMapper;

impl TypeMapper {
    /// Extract one cell from a row as a [`SqlValue`].
    ///
    /// Types without a dedicated mapping are read as text when the driver
    /// allows it, otherwise the cell degrades to NULL rather than failing
    /// the whole result. A value the driver cannot decode (e.g. a NUMERIC
    /// wider than [`Decimal`] can hold) degrades to NULL as well, with the
    /// error logged.
    pub fn extract_column(row: &Row, idx: usize) -> SqlValue {
        let column = &row.columns()[idx];
        match *column.type_() {
            Type::BOOL => Self::take(column, row.try_get::<_, Option<bool>>(idx), SqlValue::Bool),
            Type::INT2 => {
                Self::take(column, row.try_get::<_, Option<i16>>(idx), SqlValue::SmallInt)
            }
            Type::INT4 => Self::take(column, row.try_get::<_, Option<i32>>(idx), SqlValue::Int),
            Type::INT8 => Self::take(column, row.try_get::<_, Option<i64>>(idx), SqlValue::BigInt),
            Type::FLOAT4 => Self::take(column, row.try_get::<_, Option<f32>>(idx), SqlValue::Float),
            Type::FLOAT8 => {
                Self::take(column, row.try_get::<_, Option<f64>>(idx), SqlValue::Double)
            }
            Type::NUMERIC => {
                Self::take(column, row.try_get::<_, Option<Decimal>>(idx), SqlValue::Decimal)
            }
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                Self::take(column, row.try_get::<_, Option<String>>(idx), SqlValue::Text)
            }
            Type::BYTEA => {
                Self::take(column, row.try_get::<_, Option<Vec<u8>>>(idx), SqlValue::Bytes)
            }
            Type::UUID => {
                Self::take(column, row.try_get::<_, Option<uuid::Uuid>>(idx), SqlValue::Uuid)
            }
            Type::DATE => {
                Self::take(column, row.try_get::<_, Option<NaiveDate>>(idx), SqlValue::Date)
            }
            Type::TIME => {
                Self::take(column, row.try_get::<_, Option<NaiveTime>>(idx), SqlValue::Time)
            }
            Type::TIMESTAMP => Self::take(
                column,
                row.try_get::<_, Option<NaiveDateTime>>(idx),
                SqlValue::Timestamp,
            ),
            Type::TIMESTAMPTZ => Self::take(
                column,
                row.try_get::<_, Option<DateTime<Utc>>>(idx),
                SqlValue::TimestampTz,
            ),
            Type::JSON | Type::JSONB => Self::take(
                column,
                row.try_get::<_, Option<serde_json::Value>>(idx),
                SqlValue::Json,
            ),
            _ => match row.try_get::<_, Option<String>>(idx) {
                Ok(Some(s)) => SqlValue::Text(s),
                Ok(None) => SqlValue::Null,
                Err(e) => {
                    debug!(
                        "No text rendering for column '{}' ({}): {}",
                        column.name(),
                        column.type_().name(),
                        e
                    );
                    SqlValue::Null
                }
            },
        }
    }

    /// Human-readable SQL type name for a result column.
    pub fn sql_type_name(column: &Column) -> String {
        match *column.type_() {
            Type::BOOL => "boolean".to_string(),
            Type::INT2 => "smallint".to_string(),
            Type::INT4 => "integer".to_string(),
            Type::INT8 => "bigint".to_string(),
            Type::FLOAT4 => "real".to_string(),
            Type::FLOAT8 => "double precision".to_string(),
            Type::NUMERIC => "numeric".to_string(),
            Type::TEXT => "text".to_string(),
            Type::VARCHAR => "character varying".to_string(),
            Type::BPCHAR => "character".to_string(),
            Type::BYTEA => "bytea".to_string(),
            Type::UUID => "uuid".to_string(),
            Type::DATE => "date".to_string(),
            Type::TIME => "time without time zone".to_string(),
            Type::TIMESTAMP => "timestamp without time zone".to_string(),
            Type::TIMESTAMPTZ => "timestamp with time zone".to_string(),
            Type::JSON => "json".to_string(),
            Type::JSONB => "jsonb".to_string(),
            _ => column.type_().name().to_string(),
        }
    }

    fn take<T>(
        column: &Column,
        value: Result<Option<T>, tokio_postgres::Error>,
        wrap: fn(T) -> SqlValue,
    ) -> SqlValue {
        match value {
            Ok(Some(v)) => wrap(v),
            Ok(None) => SqlValue::Null,
            Err(e) => {
                warn!(
                    "Could not decode column '{}' ({}), returning null: {}",
                    column.name(),
                    column.type_().name(),
                    e
                );
                SqlValue::Null
            }
        }
    }
}

/// Serialize binary data in the `\x`-prefixed hex form psql uses.
mod hex {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        serializer.serialize_str(&format!("\\x{encoded}"))
    }
}
