//! Input schemas for MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input for the `query` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryInput {
    #[schemars(description = "SQL to execute. Runs in a read-only transaction that is always rolled back.")]
    pub sql: String,
}

/// Input for the `get_table_schema` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableSchemaInput {
    #[schemars(description = "Name of the table to describe, resolved in the configured schema.")]
    pub table_name: String,
}

/// Input for the `resolve_resource` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveResourceInput {
    #[schemars(description = "A redshift:// resource URI, e.g. redshift://tables or redshift://{host}/{table}/schema.")]
    pub uri: String,
}
