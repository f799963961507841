//! Error types for the Redshift MCP Server.
//!
//! This module defines the semantic error taxonomy and its mapping onto
//! JSON-RPC protocol errors. Query failures carry the database's own message
//! so callers see exactly what the server reported.

use rmcp::ErrorData;
use thiserror::Error;

/// Domain-specific errors for the Redshift MCP Server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Startup configuration error (missing or unusable settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cannot establish or has lost the database session.
    ///
    /// Fatal at startup; any later occurrence surfaces as a protocol-level
    /// error for the request that hit it.
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The submitted SQL failed to execute.
    ///
    /// The message is the database's own error text, passed through
    /// unmodified. `code` carries the SQLSTATE when the server provided one.
    #[error("Query failed: {message}")]
    Query {
        message: String,
        code: Option<String>,
    },

    /// A resource URI that does not match the `redshift://` grammar.
    #[error("{0}")]
    InvalidResourceUri(String),

    /// Internal error (serialization failures and other bugs).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a connection error with a source.
    pub fn connection_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a query execution error.
    pub fn query_error(msg: impl Into<String>) -> Self {
        Self::Query {
            message: msg.into(),
            code: None,
        }
    }

    /// Create an invalid resource URI error.
    pub fn invalid_resource_uri(msg: impl Into<String>) -> Self {
        Self::InvalidResourceUri(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get a user-friendly suggestion for how to fix this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => {
                Some("Pass the connection URL as the first argument or set DATABASE_URL")
            }
            Self::Connection { .. } => {
                Some("Check the connection URL, network reachability, and credentials")
            }
            Self::Query { .. } => {
                Some("Check the SQL syntax and that referenced tables exist in the configured schema")
            }
            Self::InvalidResourceUri(_) => {
                Some("Use redshift://schema, redshift://tables, or redshift://{host}/{table}/schema")
            }
            Self::Internal(_) => None,
        }
    }
}

/// Convert driver errors into the server taxonomy.
///
/// Errors the database itself raised (syntax errors, permission denials,
/// read-only violations) become `Query` with the server's message and
/// SQLSTATE. Everything else is a transport-level failure of the session.
impl From<tokio_postgres::Error> for ServerError {
    fn from(e: tokio_postgres::Error) -> Self {
        if let Some(db) = e.as_db_error() {
            return ServerError::Query {
                message: db.message().to_string(),
                code: Some(db.code().code().to_string()),
            };
        }

        if e.is_closed() {
            return ServerError::connection("Database connection closed");
        }

        ServerError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

/// Convert ServerError to rmcp's ErrorData for protocol responses.
///
/// Tool failures should generally return an error `CallToolResult` with a
/// message instead of using this conversion; this is for protocol-level
/// errors (resource reads, initialization).
impl From<ServerError> for ErrorData {
    fn from(e: ServerError) -> Self {
        match e {
            ServerError::Config(msg) => ErrorData::invalid_request(msg, None),
            ServerError::InvalidResourceUri(msg) => ErrorData::invalid_params(msg, None),
            ServerError::Connection { message, .. } => ErrorData::internal_error(message, None),
            ServerError::Query { message, .. } => {
                ErrorData::internal_error(format!("Query failed: {}", message), None)
            }
            ServerError::Internal(msg) => ErrorData::internal_error(msg, None),
        }
    }
}
