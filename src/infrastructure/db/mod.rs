pub mod connection;
pub mod database_table;
pub mod table_factory;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::{Resource, TableSpec};

/// Destination table of an import
#[async_trait]
pub trait DataStorage {
    /// Adopt `spec` as the table schema; creating or altering the physical
    /// table is up to the implementation.
    async fn set_schema(&self, spec: &TableSpec) -> Result<()>;

    /// Row count. May lazily create the physical table.
    async fn count(&self) -> Result<u64>;

    /// Remove the physical table and everything loaded into it.
    async fn drop_table(&self) -> Result<()>;

    fn table_name(&self) -> &str;
}

/// Hands out the destination storage of a resource
#[async_trait]
pub trait StorageFactory {
    async fn instance(&self, resource: &Resource) -> Result<Arc<dyn DataStorage + Send + Sync>>;
}

/// Opens sessions that are allowed to run bulk file loads
#[async_trait]
pub trait BulkLoadConnector {
    /// Open a session allowed to stream `file_path`, and no other file, to
    /// the server.
    async fn connect(&self, file_path: &Path) -> Result<Box<dyn BulkLoadSession + Send>>;
}

/// A connection dedicated to a single bulk load
#[async_trait]
pub trait BulkLoadSession {
    /// Run a bulk-load statement, returning the number of affected rows.
    async fn execute(&mut self, statement: &str) -> Result<u64>;

    async fn close(self: Box<Self>) -> Result<()>;
}
