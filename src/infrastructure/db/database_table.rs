use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::MySqlPool;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::DataStorage;
use crate::application::use_cases::load_statement::{escape_string_literal, ROW_IDENTITY_COLUMN};
use crate::domain::error::{AppError, Result};
use crate::domain::{ColumnSpec, TableSpec};

/// MySQL caps column comments at 1024 characters
const MAX_COMMENT_CHARS: usize = 1024;

/// A MySQL datastore table.
///
/// The schema is only recorded by `set_schema`; the physical table is
/// created (or widened with missing columns) on the next `count`.
pub struct MySqlDatabaseTable {
    pool: MySqlPool,
    table_name: String,
    schema: RwLock<Option<TableSpec>>,
}

impl MySqlDatabaseTable {
    pub fn new(pool: MySqlPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
            schema: RwLock::new(None),
        }
    }

    async fn ensure_table(&self, spec: &TableSpec) -> Result<()> {
        sqlx::query(&create_table_sql(&self.table_name, spec))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create table: {}", e)))?;

        let existing: HashSet<String> = sqlx::query_as::<_, (String,)>(
            "SELECT COLUMN_NAME FROM information_schema.COLUMNS
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?",
        )
        .bind(&self.table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch table columns: {}", e)))?
        .into_iter()
        .map(|(name,)| name)
        .collect();

        let missing: Vec<&ColumnSpec> = spec
            .columns()
            .iter()
            .filter(|c| !existing.contains(&c.name))
            .collect();

        if let Some(sql) = add_columns_sql(&self.table_name, &missing) {
            debug!(table = %self.table_name, added = missing.len(), "Altering datastore table");
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to alter table: {}", e)))?;
        }

        Ok(())
    }
}

#[async_trait]
impl DataStorage for MySqlDatabaseTable {
    async fn set_schema(&self, spec: &TableSpec) -> Result<()> {
        *self.schema.write().await = Some(spec.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        if let Some(spec) = self.schema.read().await.as_ref() {
            self.ensure_table(spec).await?;
        }

        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM `{}`", self.table_name))
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to count rows: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn drop_table(&self) -> Result<()> {
        sqlx::query(&format!("DROP TABLE IF EXISTS `{}`", self.table_name))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to drop table: {}", e)))?;

        info!(table = %self.table_name, "Dropped datastore table");
        Ok(())
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn column_definition(column: &ColumnSpec) -> String {
    let comment: String = column
        .definition
        .description
        .chars()
        .take(MAX_COMMENT_CHARS)
        .collect();

    format!(
        "`{}` {} COMMENT '{}'",
        column.name,
        column.definition.field_type.as_sql(),
        escape_string_literal(&comment)
    )
}

pub(crate) fn create_table_sql(table_name: &str, spec: &TableSpec) -> String {
    let mut definitions = vec![format!(
        "`{}` INT UNSIGNED NOT NULL AUTO_INCREMENT",
        ROW_IDENTITY_COLUMN
    )];
    definitions.extend(spec.columns().iter().map(column_definition));
    definitions.push(format!("PRIMARY KEY (`{}`)", ROW_IDENTITY_COLUMN));

    format!(
        "CREATE TABLE IF NOT EXISTS `{}` ({}) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
        table_name,
        definitions.join(", ")
    )
}

pub(crate) fn add_columns_sql(table_name: &str, columns: &[&ColumnSpec]) -> Option<String> {
    if columns.is_empty() {
        return None;
    }

    let additions = columns
        .iter()
        .map(|c| format!("ADD COLUMN {}", column_definition(c)))
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!("ALTER TABLE `{}` {}", table_name, additions))
}
