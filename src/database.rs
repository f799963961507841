//! Database layer: the shared session, the read-only executor, catalog
//! access, and value typing.

pub mod catalog;
pub mod connection;
pub mod query;
pub mod types;

pub use catalog::{CatalogColumn, CatalogReader, ColumnDescriptor, TableDescriptor};
pub use connection::Database;
pub use query::{ColumnInfo, QueryExecutor, QueryResult, ResultRow};
pub use types::{SqlValue, TypeMapper};
