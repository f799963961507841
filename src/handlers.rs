//! MCP protocol handlers.
//!
//! Implements the rmcp `ServerHandler` surface: server identity and
//! capabilities, resource listing and reads, and (via `#[tool_handler]`)
//! tool listing and dispatch.

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    Implementation, ListResourceTemplatesResult, ListResourcesResult, Meta,
    PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam, ReadResourceResult,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool_handler, ErrorData};
use tracing::info;

use crate::resources;
use crate::server::RedshiftMcpServer;

#[tool_handler]
impl ServerHandler for RedshiftMcpServer {
    fn get_info(&self) -> ServerInfo {
        info!("MCP client requesting server info");

        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                title: Some("Redshift MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(build_instructions(self)),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let resources = resources::build_resource_list(self)
            .await
            .map_err(ErrorData::from)?;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: Some(Meta(
                serde_json::json!({ "default_schema": self.default_schema() })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            )),
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: resources::build_resource_templates(self),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        resources::read_resource(self, &request.uri)
            .await
            .map_err(ErrorData::from)
    }
}

/// Markdown usage notes sent to clients at initialization.
fn build_instructions(server: &RedshiftMcpServer) -> String {
    let mut instructions = String::new();
    instructions.push_str("# Redshift MCP Server\n\n");
    instructions.push_str("Read-only SQL access to an Amazon Redshift warehouse. ");
    instructions.push_str(
        "Every query runs inside a READ ONLY transaction that is rolled back after execution, \
         so no statement can persist changes.\n\n",
    );
    instructions.push_str("## Tools\n\n");
    instructions.push_str("- `query`: run SQL, returns columns, rows, and timing as JSON\n");
    instructions.push_str("- `get_table_schema`: column structure of one table\n");
    instructions.push_str("- `resolve_resource`: read a redshift:// resource by URI\n\n");
    instructions.push_str("## Resources\n\n");
    instructions.push_str("- `redshift://schema`: all columns of every table\n");
    instructions.push_str("- `redshift://tables`: table names\n");
    instructions.push_str("- `redshift://{host}/{table}/schema`: one table's columns\n\n");
    instructions.push_str(&format!(
        "Unqualified table names resolve in the '{}' schema.\n",
        server.default_schema()
    ));
    instructions
}
