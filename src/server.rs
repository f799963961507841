//! Server state shared across protocol handlers.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;

use crate::config::Config;
use crate::database::{CatalogReader, Database, QueryExecutor};
use crate::error::ServerError;

/// The Redshift MCP server.
///
/// Holds the configuration, the single shared session, and the components
/// built on top of it. Cloning is cheap; all state is behind `Arc`.
#[derive(Clone)]
pub struct RedshiftMcpServer {
    pub(crate) config: Arc<Config>,
    pub(crate) database: Arc<Database>,
    pub(crate) executor: Arc<QueryExecutor>,
    pub(crate) catalog: Arc<CatalogReader>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl RedshiftMcpServer {
    /// Connect to the warehouse and assemble the server.
    ///
    /// Connection failure here is fatal; there is no lazy or retried
    /// connect.
    pub async fn new(config: Config) -> Result<Self, ServerError> {
        let database = Arc::new(Database::connect(&config).await?);
        let executor = QueryExecutor::new(database.clone(), config.default_schema.as_str());
        let catalog = CatalogReader::new(executor.clone(), config.default_schema.as_str());

        Ok(Self {
            config: Arc::new(config),
            database,
            executor: Arc::new(executor),
            catalog: Arc::new(catalog),
            tool_router: crate::tools::create_tool_router(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    pub fn catalog(&self) -> &CatalogReader {
        &self.catalog
    }

    /// Schema used for catalog listings and name resolution.
    pub fn default_schema(&self) -> &str {
        &self.config.default_schema
    }
}
