//! Centralized constants for the Redshift MCP Server.
//!
//! This module contains the default values and fixed protocol strings used
//! throughout the codebase, making them easy to find, understand, and modify.

// =============================================================================
// Configuration Constants
// =============================================================================

/// Environment variable holding the database connection URL.
///
/// The first CLI argument takes precedence over this variable.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable selecting the schema used for catalog enumeration
/// and query name resolution.
pub const DEFAULT_SCHEMA_ENV: &str = "DEFAULT_SCHEMA";

/// Schema used when `DEFAULT_SCHEMA` is not set.
pub const DEFAULT_SCHEMA_NAME: &str = "public";

/// Application name reported to the database server.
pub const APPLICATION_NAME: &str = "redshift-mcp-server";

// =============================================================================
// Resource URI Constants
// =============================================================================

/// URI scheme for all resources exposed by this server.
pub const URI_SCHEME: &str = "redshift";

/// URI of the full default-schema catalog resource.
pub const SCHEMA_RESOURCE_URI: &str = "redshift://schema";

/// URI of the table-list resource.
pub const TABLES_RESOURCE_URI: &str = "redshift://tables";

// =============================================================================
// Logging Constants
// =============================================================================

/// Default truncation length for query logging.
pub const LOG_QUERY_TRUNCATE_LENGTH: usize = 200;
