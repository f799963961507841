//! MCP tool implementations.
//!
//! Query failures are returned as error tool results carrying the
//! database's own message, not as protocol errors; the connection URL never
//! appears in any result.

pub mod inputs;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ResourceContents};
use rmcp::{tool, tool_router, ErrorData};
use serde::Serialize;
use tracing::warn;

use crate::error::ServerError;
use crate::resources;
use crate::server::RedshiftMcpServer;
use crate::tools::inputs::{QueryInput, ResolveResourceInput, TableSchemaInput};

#[tool_router]
impl RedshiftMcpServer {
    /// Run a read-only SQL query and return rows as JSON.
    #[tool(
        description = "Run a SQL query against the warehouse. The query executes inside a READ ONLY transaction that is rolled back afterwards, so no statement can persist changes. Returns columns, rows, and timing as JSON."
    )]
    pub async fn query(
        &self,
        Parameters(input): Parameters<QueryInput>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.executor().execute(&input.sql).await {
            Ok(result) => json_result(&result),
            Err(e) => Ok(error_result(&e)),
        }
    }

    /// Describe one table's columns.
    #[tool(
        description = "Get the column structure of a table in the configured schema: column names, data types, and nullability in ordinal order. An unknown table returns an empty column list."
    )]
    pub async fn get_table_schema(
        &self,
        Parameters(input): Parameters<TableSchemaInput>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.catalog().describe_table(&input.table_name).await {
            Ok(descriptor) => json_result(&descriptor),
            Err(e) => Ok(error_result(&e)),
        }
    }

    /// Resolve a `redshift://` URI to its resource content.
    #[tool(
        description = "Resolve a redshift:// resource URI (redshift://schema, redshift://tables, or redshift://{host}/{table}/schema) and return its content."
    )]
    pub async fn resolve_resource(
        &self,
        Parameters(input): Parameters<ResolveResourceInput>,
    ) -> Result<CallToolResult, ErrorData> {
        match resources::read_resource(self, &input.uri).await {
            Ok(result) => {
                let text: Vec<String> = result
                    .contents
                    .into_iter()
                    .filter_map(|contents| match contents {
                        ResourceContents::TextResourceContents { text, .. } => Some(text),
                        _ => None,
                    })
                    .collect();
                Ok(CallToolResult::success(vec![Content::text(text.join("\n"))]))
            }
            Err(e) => Ok(error_result(&e)),
        }
    }
}

/// The router over all tools above.
pub fn create_tool_router() -> ToolRouter<RedshiftMcpServer> {
    RedshiftMcpServer::tool_router()
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(format!("Failed to serialize result: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn error_result(error: &ServerError) -> CallToolResult {
    warn!("Tool call failed: {}", error);
    let mut message = error.to_string();
    if let Some(suggestion) = error.suggestion() {
        message.push_str("\nHint: ");
        message.push_str(suggestion);
    }
    CallToolResult::error(vec![Content::text(message)])
}
