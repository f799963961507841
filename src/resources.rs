//! MCP resource handling.
//!
//! Resources expose the warehouse catalog under the `redshift://` scheme:
//!
//! - `redshift://schema` - every column of every table in the schema
//! - `redshift://tables` - table names only
//! - `redshift://{host}/{table}/schema` - one table's column structure
//!
//! The host segment of per-table URIs is the credential-free display host;
//! it identifies the warehouse but plays no part in resolution.

use serde::Serialize;

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};

use crate::constants::{SCHEMA_RESOURCE_URI, TABLES_RESOURCE_URI, URI_SCHEME};
use crate::error::ServerError;
use crate::server::RedshiftMcpServer;

// ============================================================================
// Resource Listing
// ============================================================================

/// Build the resource list: the two catalog resources plus one per table.
pub async fn build_resource_list(
    server: &RedshiftMcpServer,
) -> Result<Vec<Resource>, ServerError> {
    let schema = server.default_schema();
    let mut resources = vec![
        create_resource(
            SCHEMA_RESOURCE_URI,
            "Schema catalog",
            &format!("All columns of every table in the '{schema}' schema"),
        ),
        create_resource(
            TABLES_RESOURCE_URI,
            "Tables",
            &format!("Table names in the '{schema}' schema"),
        ),
    ];

    let host = server.database().display_host();
    for table in server.catalog().list_tables().await? {
        resources.push(create_resource(
            &format!("{URI_SCHEME}://{host}/{table}/schema"),
            &format!("{table} schema"),
            &format!("Column structure of the '{table}' table"),
        ));
    }
    Ok(resources)
}

/// The single URI template for per-table schema resources.
pub fn build_resource_templates(server: &RedshiftMcpServer) -> Vec<ResourceTemplate> {
    let host = server.database().display_host();
    vec![RawResourceTemplate {
        uri_template: format!("{URI_SCHEME}://{host}/{{table}}/schema"),
        name: "Table schema".to_string(),
        title: None,
        description: Some("Column structure of a single table".to_string()),
        mime_type: Some("application/json".to_string()),
        icons: None,
    }
    .no_annotation()]
}

fn create_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut resource = RawResource::new(uri, name);
    resource.description = Some(description.to_string());
    resource.mime_type = Some("application/json".to_string());
    resource.no_annotation()
}

// ============================================================================
// Resource Reads
// ============================================================================

/// Read a resource by URI, returning its content as pretty-printed JSON.
pub async fn read_resource(
    server: &RedshiftMcpServer,
    uri: &str,
) -> Result<ReadResourceResult, ServerError> {
    let parsed =
        parse_resource_uri(uri).map_err(|e| ServerError::invalid_resource_uri(e.to_string()))?;

    let content = match parsed {
        ResourceUri::SchemaCatalog => {
            let columns = server.catalog().schema_catalog().await?;
            to_pretty_json(&serde_json::json!({
                "schema": server.default_schema(),
                "column_count": columns.len(),
                "columns": columns,
            }))?
        }
        ResourceUri::Tables => {
            let tables = server.catalog().list_tables().await?;
            to_pretty_json(&serde_json::json!({
                "schema": server.default_schema(),
                "count": tables.len(),
                "tables": tables,
            }))?
        }
        ResourceUri::TableSchema { table } => {
            let descriptor = server.catalog().describe_table(&table).await?;
            to_pretty_json(&serde_json::json!({
                "schema": server.default_schema(),
                "table": descriptor.table_name,
                "column_count": descriptor.columns.len(),
                "columns": descriptor.columns,
            }))?
        }
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(content, uri.to_string())],
    })
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ServerError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ServerError::internal(format!("Failed to serialize resource: {e}")))
}

// ============================================================================
// Resource URI Parsing
// ============================================================================

/// Parsed resource URI variants.
#[derive(Debug)]
enum ResourceUri {
    SchemaCatalog,
    Tables,
    TableSchema { table: String },
}

/// Error type for resource URI parsing with detailed context.
#[derive(Debug)]
struct ResourceParseError {
    uri: String,
    reason: ParseErrorReason,
}

/// Specific reasons why a resource URI parse failed.
#[derive(Debug)]
enum ParseErrorReason {
    /// URI does not start with the redshift:// scheme
    InvalidScheme,
    /// URI path is empty or contains no segments
    EmptyPath,
    /// Unknown resource type (single segment not recognized)
    UnknownResourceType { segment: String },
    /// Missing required path component
    MissingComponent { expected: &'static str },
    /// Too many path segments
    TooManySegments { expected: usize, got: usize },
}

impl std::fmt::Display for ResourceParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid resource URI '{}': ", self.uri)?;
        match &self.reason {
            ParseErrorReason::InvalidScheme => {
                write!(f, "URI must start with 'redshift://' scheme")
            }
            ParseErrorReason::EmptyPath => {
                write!(f, "URI path is empty")
            }
            ParseErrorReason::UnknownResourceType { segment } => {
                write!(
                    f,
                    "unknown resource type '{}'. Valid forms: redshift://schema, redshift://tables, redshift://{{host}}/{{table}}/schema",
                    segment
                )
            }
            ParseErrorReason::MissingComponent { expected } => {
                write!(f, "missing required component: {}", expected)
            }
            ParseErrorReason::TooManySegments { expected, got } => {
                write!(
                    f,
                    "too many path segments (expected {}, got {})",
                    expected, got
                )
            }
        }
    }
}

impl std::error::Error for ResourceParseError {}

fn parse_resource_uri(uri: &str) -> Result<ResourceUri, ResourceParseError> {
    let prefix = format!("{URI_SCHEME}://");
    let path = match uri.strip_prefix(&prefix) {
        Some(p) => p,
        None => {
            return Err(ResourceParseError {
                uri: uri.to_string(),
                reason: ParseErrorReason::InvalidScheme,
            });
        }
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return Err(ResourceParseError {
            uri: uri.to_string(),
            reason: ParseErrorReason::EmptyPath,
        });
    }

    match segments.as_slice() {
        ["schema"] => Ok(ResourceUri::SchemaCatalog),
        ["tables"] => Ok(ResourceUri::Tables),
        [other] => Err(ResourceParseError {
            uri: uri.to_string(),
            reason: ParseErrorReason::UnknownResourceType {
                segment: (*other).to_string(),
            },
        }),
        // The host segment identifies the warehouse but is not used for
        // resolution; the table resolves in the configured schema.
        [_host, table, "schema"] => Ok(ResourceUri::TableSchema {
            table: (*table).to_string(),
        }),
        [_host, _table] | [_host, _table, _] => Err(ResourceParseError {
            uri: uri.to_string(),
            reason: ParseErrorReason::MissingComponent {
                expected: "schema (use redshift://{host}/{table}/schema)",
            },
        }),
        _ => Err(ResourceParseError {
            uri: uri.to_string(),
            reason: ParseErrorReason::TooManySegments {
                expected: 3,
                got: segments.len(),
            },
        }),
    }
}
