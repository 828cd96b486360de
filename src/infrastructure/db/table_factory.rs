use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use tokio::sync::RwLock;

use super::database_table::MySqlDatabaseTable;
use super::{DataStorage, StorageFactory};
use crate::domain::error::Result;
use crate::domain::Resource;

/// Hex characters of the resource hash kept in the table name
const TABLE_HASH_LENGTH: usize = 32;

/// Deterministic datastore table name for a resource
pub fn table_name_for(prefix: &str, resource: &Resource) -> String {
    let hash = hex::encode(Sha256::digest(resource.unique_identifier().as_bytes()));
    format!("{}{}", prefix, &hash[..TABLE_HASH_LENGTH])
}

/// Creates one table handle per resource and reuses it afterwards.
pub struct DatabaseTableFactory {
    pool: MySqlPool,
    table_prefix: String,
    tables: RwLock<HashMap<String, Arc<MySqlDatabaseTable>>>,
}

impl DatabaseTableFactory {
    pub fn new(pool: MySqlPool, table_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            table_prefix: table_prefix.into(),
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub async fn table(&self, resource: &Resource) -> Arc<MySqlDatabaseTable> {
        let key = resource.unique_identifier();

        if let Some(table) = self.tables.read().await.get(&key) {
            return table.clone();
        }

        let mut tables = self.tables.write().await;
        tables
            .entry(key)
            .or_insert_with(|| {
                Arc::new(MySqlDatabaseTable::new(
                    self.pool.clone(),
                    table_name_for(&self.table_prefix, resource),
                ))
            })
            .clone()
    }
}

#[async_trait]
impl StorageFactory for DatabaseTableFactory {
    async fn instance(&self, resource: &Resource) -> Result<Arc<dyn DataStorage + Send + Sync>> {
        Ok(self.table(resource).await)
    }
}
