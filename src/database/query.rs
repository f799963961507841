//! Read-only query execution.
//!
//! Every query runs inside its own READ ONLY transaction on the single
//! shared session, and the transaction is rolled back unconditionally,
//! whether the query succeeded or failed. Nothing a caller submits can
//! leave a persistent change behind.

use std::sync::Arc;
use std::time::Instant;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tokio_postgres::types::ToSql;
use tokio_postgres::Transaction;
use tracing::debug;

use crate::constants::LOG_QUERY_TRUNCATE_LENGTH;
use crate::database::connection::Database;
use crate::database::types::{SqlValue, TypeMapper};
use crate::error::ServerError;

// ============================================================================
// Result Types
// ============================================================================

/// Metadata for one column of a result set.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    /// Column name as reported by the server.
    pub name: String,
    /// SQL type name.
    pub sql_type: String,
}

/// A single result row, preserving the column order of the query.
#[derive(Debug, Clone, Default)]
pub struct ResultRow {
    values: Vec<(String, SqlValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn insert(&mut self, column: String, value: SqlValue) {
        self.values.push((column, value));
    }

    /// Look up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Serialize as a JSON object with keys in column order.
impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The fully materialized result of one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<ResultRow>,
    pub row_count: usize,
    pub execution_time_ms: u64,
}

// ============================================================================
// Query Executor
// ============================================================================

/// Runs SQL against the shared session under read-only transactions.
#[derive(Clone)]
pub struct QueryExecutor {
    database: Arc<Database>,
    default_schema: String,
}

impl QueryExecutor {
    pub fn new(database: Arc<Database>, default_schema: impl Into<String>) -> Self {
        Self {
            database,
            default_schema: default_schema.into(),
        }
    }

    /// Execute a SQL string submitted by a client.
    pub async fn execute(&self, sql: &str) -> Result<QueryResult, ServerError> {
        self.execute_with_params(sql, &[]).await
    }

    /// Execute SQL with bind parameters.
    ///
    /// The SQL text is sent to the server as-is; it is never parsed or
    /// filtered here. The transaction mode is the sole write guard: the
    /// server rejects any write attempted under READ ONLY, and the rollback
    /// discards everything else. Server-side state that falls outside
    /// transactional control (system logging tables, for instance) is not
    /// covered by that guarantee.
    pub async fn execute_with_params(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<QueryResult, ServerError> {
        let start = Instant::now();
        debug!("Executing query: {}", truncate_for_log(sql));

        let mut client = self.database.client().lock().await;

        // Session-level search path, applied before the transaction opens so
        // unqualified table names resolve against the configured schema.
        client
            .batch_execute(&format!(
                "SET search_path TO {}",
                quote_identifier(&self.default_schema)
            ))
            .await?;

        let transaction = client.build_transaction().read_only(true).start().await?;
        let outcome = run_query(&transaction, sql, params).await;
        let rollback = transaction.rollback().await;

        // A failed query takes precedence over a failed rollback; the
        // database's own error text passes through unmodified.
        let (columns, rows) = match outcome {
            Ok(result) => result,
            Err(e) => return Err(e.into()),
        };
        rollback?;

        let mut result_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut result_row = ResultRow::new();
            for (idx, column) in row.columns().iter().enumerate() {
                result_row.insert(
                    column.name().to_string(),
                    TypeMapper::extract_column(row, idx),
                );
            }
            result_rows.push(result_row);
        }

        let execution_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Query returned {} rows in {}ms",
            result_rows.len(),
            execution_time_ms
        );

        Ok(QueryResult {
            columns,
            row_count: result_rows.len(),
            rows: result_rows,
            execution_time_ms,
        })
    }
}

/// Prepare and run one statement, collecting column metadata and all rows.
///
/// Preparing first means column metadata is available even for results with
/// zero rows.
async fn run_query(
    transaction: &Transaction<'_>,
    sql: &str,
    params: &[&(dyn ToSql + Sync)],
) -> Result<(Vec<ColumnInfo>, Vec<tokio_postgres::Row>), tokio_postgres::Error> {
    let statement = transaction.prepare(sql).await?;
    let columns = statement
        .columns()
        .iter()
        .map(|col| ColumnInfo {
            name: col.name().to_string(),
            sql_type: TypeMapper::sql_type_name(col),
        })
        .collect();
    let rows = transaction.query(&statement, params).await?;
    Ok((columns, rows))
}

/// Quote an identifier for interpolation into a SET statement.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Shorten SQL for log lines.
fn truncate_for_log(sql: &str) -> String {
    let trimmed = sql.trim();
    if trimmed.len() <= LOG_QUERY_TRUNCATE_LENGTH {
        trimmed.to_string()
    } else {
        let truncated: String = trimmed.chars().take(LOG_QUERY_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_query_unchanged() {
        assert_eq!(truncate_for_log("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn test_truncate_long_query() {
        let long = "SELECT ".to_string() + &"x, ".repeat(200);
        let truncated = truncate_for_log(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= LOG_QUERY_TRUNCATE_LENGTH + 3);
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("public"), "\"public\"");
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_result_row_preserves_column_order() {
        let mut row = ResultRow::new();
        row.insert("zebra".to_string(), SqlValue::Int(1));
        row.insert("apple".to_string(), SqlValue::Int(2));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, "{\"zebra\":1,\"apple\":2}");
    }

    #[test]
    fn test_result_row_lookup() {
        let mut row = ResultRow::new();
        row.insert("id".to_string(), SqlValue::Int(7));
        assert_eq!(row.get("id"), Some(&SqlValue::Int(7)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 1);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_query_result_serialization() {
        let result = QueryResult {
            columns: vec![ColumnInfo {
                name: "id".to_string(),
                sql_type: "integer".to_string(),
            }],
            rows: vec![],
            row_count: 0,
            execution_time_ms: 12,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["columns"][0]["sql_type"], "integer");
    }
}
