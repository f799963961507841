//! Warehouse catalog access.
//!
//! Table listings and column descriptors come from `information_schema`,
//! scoped to the configured schema. Catalog reads go through the same
//! read-only executor as client queries, so they carry the same rollback
//! guarantee.

use serde::{Deserialize, Serialize};

use crate::database::query::{QueryExecutor, ResultRow};
use crate::database::types::SqlValue;
use crate::error::ServerError;

// information_schema columns are typed as catalog domains (sql_identifier,
// cardinal_number); the casts below reduce them to plain text and int so
// value extraction sees base types.

const LIST_TABLES_SQL: &str = "\
    SELECT table_name::text AS table_name \
    FROM information_schema.tables \
    WHERE table_schema = $1 \
    ORDER BY table_name";

const DESCRIBE_TABLE_SQL: &str = "\
    SELECT column_name::text AS column_name, \
           data_type::text AS data_type, \
           is_nullable::text AS is_nullable \
    FROM information_schema.columns \
    WHERE table_schema = $1 AND table_name = $2 \
    ORDER BY ordinal_position";

const SCHEMA_CATALOG_SQL: &str = "\
    SELECT table_name::text AS table_name, \
           column_name::text AS column_name, \
           data_type::text AS data_type, \
           ordinal_position::int AS ordinal_position \
    FROM information_schema.columns \
    WHERE table_schema = $1 \
    ORDER BY table_name, ordinal_position";

// ============================================================================
// Descriptor Types
// ============================================================================

/// One column of a table, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

/// The described structure of a single table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Whether the name matched anything in the catalog.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One row of the whole-schema catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogColumn {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub ordinal_position: i32,
}

// ============================================================================
// Catalog Reader
// ============================================================================

/// Reads table and column metadata for the configured schema.
pub struct CatalogReader {
    executor: QueryExecutor,
    schema: String,
}

impl CatalogReader {
    pub fn new(executor: QueryExecutor, schema: impl Into<String>) -> Self {
        Self {
            executor,
            schema: schema.into(),
        }
    }

    /// List table names in the configured schema, alphabetically.
    pub async fn list_tables(&self) -> Result<Vec<String>, ServerError> {
        let result = self
            .executor
            .execute_with_params(LIST_TABLES_SQL, &[&self.schema])
            .await?;
        Ok(result
            .rows
            .iter()
            .map(|row| extract_string(row, "table_name"))
            .collect())
    }

    /// Describe the columns of one table, in ordinal position order.
    ///
    /// A name that matches nothing in the catalog yields a descriptor with
    /// an empty column list, not an error; callers distinguish the two by
    /// emptiness.
    pub async fn describe_table(&self, table_name: &str) -> Result<TableDescriptor, ServerError> {
        let result = self
            .executor
            .execute_with_params(DESCRIBE_TABLE_SQL, &[&self.schema, &table_name])
            .await?;
        let columns = result
            .rows
            .iter()
            .map(|row| ColumnDescriptor {
                column_name: extract_string(row, "column_name"),
                data_type: extract_string(row, "data_type"),
                is_nullable: extract_string(row, "is_nullable") == "YES",
            })
            .collect();
        Ok(TableDescriptor {
            table_name: table_name.to_string(),
            columns,
        })
    }

    /// Every column of every table in the schema, grouped by table.
    pub async fn schema_catalog(&self) -> Result<Vec<CatalogColumn>, ServerError> {
        let result = self
            .executor
            .execute_with_params(SCHEMA_CATALOG_SQL, &[&self.schema])
            .await?;
        Ok(result
            .rows
            .iter()
            .map(|row| CatalogColumn {
                table_name: extract_string(row, "table_name"),
                column_name: extract_string(row, "column_name"),
                data_type: extract_string(row, "data_type"),
                ordinal_position: extract_i32(row, "ordinal_position"),
            })
            .collect())
    }
}

// ============================================================================
// Row Extraction Helpers
// ============================================================================

fn extract_string(row: &ResultRow, column: &str) -> String {
    match row.get(column) {
        Some(SqlValue::Text(s)) => s.clone(),
        _ => String::new(),
    }
}

fn extract_i32(row: &ResultRow, column: &str) -> i32 {
    match row.get(column) {
        Some(SqlValue::Int(v)) => *v,
        Some(SqlValue::SmallInt(v)) => i32::from(*v),
        Some(SqlValue::BigInt(v)) => *v as i32,
        _ => 0,
    }
}
