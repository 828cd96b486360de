use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::application::MysqlImportUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::ImportConfig;
use crate::infrastructure::db::connection::{
    connect_pool, DbConnectionConfig, MySqlBulkLoadConnector,
};
use crate::infrastructure::db::table_factory::DatabaseTableFactory;
use crate::infrastructure::files::LocalFileResolver;

/// Wire the import use case to MySQL and the local filesystem.
pub async fn build_import_use_case(config: &ImportConfig) -> Result<MysqlImportUseCase> {
    let database_url = config.database_url()?;
    let connect_timeout = Duration::from_secs(config.connect_timeout_secs);

    let pool_config = DbConnectionConfig {
        connect_timeout_secs: config.connect_timeout_secs,
        ..Default::default()
    };
    let pool = connect_pool(database_url, &pool_config).await?;
    let connector = MySqlBulkLoadConnector::from_url(database_url, connect_timeout)?;

    info!(
        files_root = %config.files_root.display(),
        table_prefix = %config.table_prefix,
        local_infile = config.local_infile,
        "Datastore importer initialized"
    );

    let use_case = MysqlImportUseCase::new(
        Arc::new(LocalFileResolver::new(config.files_root.clone())),
        Arc::new(DatabaseTableFactory::new(pool, config.table_prefix.clone())),
        Arc::new(connector),
    )
    .with_local_infile(config.local_infile);

    Ok(use_case)
}
