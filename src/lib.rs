//! Redshift MCP Server
//!
//! A Model Context Protocol server that gives AI assistants read-only SQL
//! access to an Amazon Redshift data warehouse over the PostgreSQL wire
//! protocol.
//!
//! The server holds a single warehouse session. Every query a client
//! submits runs inside its own READ ONLY transaction on that session and is
//! rolled back unconditionally, so nothing a client does can persist
//! changes. The warehouse catalog is exposed both as MCP resources under
//! the `redshift://` scheme and as tools.
//!
//! The session is plaintext only: a connection URL with `sslmode=require`
//! fails at startup. Use a network path that allows plaintext, or terminate
//! TLS upstream of the server.

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod handlers;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::ServerError;
pub use server::RedshiftMcpServer;
