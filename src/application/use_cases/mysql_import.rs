// ============================================================
// MYSQL IMPORT USE CASE
// ============================================================
// Bulk-load a CSV resource into its datastore table with LOAD DATA

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::application::use_cases::load_statement::{escape_string_literal, LoadDataStatement};
use crate::application::use_cases::table_spec_builder::generate_table_spec;
use crate::domain::error::{AppError, Result};
use crate::domain::{Eol, ImportResult, ImportStatus, Resource, TableSpec};
use crate::infrastructure::csv::CsvHeaderReader;
use crate::infrastructure::db::{BulkLoadConnector, StorageFactory};
use crate::infrastructure::files::FileResolver;

/// Steps of an import, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    ResolvingPath,
    ReadingHeader,
    BuildingSchema,
    LoadingData,
}

/// What an import learns from a file's header row
#[derive(Debug, Clone, Serialize)]
pub struct HeaderAnalysis {
    pub eol: Eol,
    pub header_line_count: usize,
    pub spec: TableSpec,
}

pub struct MysqlImportUseCase {
    file_resolver: Arc<dyn FileResolver + Send + Sync>,
    storage_factory: Arc<dyn StorageFactory + Send + Sync>,
    connector: Arc<dyn BulkLoadConnector + Send + Sync>,
    header_reader: CsvHeaderReader,
    local_infile: bool,
    replace: bool,
}

impl MysqlImportUseCase {
    pub fn new(
        file_resolver: Arc<dyn FileResolver + Send + Sync>,
        storage_factory: Arc<dyn StorageFactory + Send + Sync>,
        connector: Arc<dyn BulkLoadConnector + Send + Sync>,
    ) -> Self {
        Self {
            file_resolver,
            storage_factory,
            connector,
            header_reader: CsvHeaderReader::new(),
            local_infile: true,
            replace: false,
        }
    }

    pub fn with_local_infile(mut self, local_infile: bool) -> Self {
        self.local_infile = local_infile;
        self
    }

    /// Drop the destination table before loading, discarding earlier imports.
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Import `resource`. Never fails: every error ends up in the result.
    pub async fn run(&self, resource: &Resource) -> ImportResult {
        let mut result = ImportResult::new();
        result.start();

        info!(
            resource_id = %resource.identifier,
            version = %resource.version,
            "Starting datastore import"
        );

        match self.import(resource).await {
            Ok(rows) => {
                result.set_status(ImportStatus::Done);
                info!(
                    resource_id = %resource.identifier,
                    version = %resource.version,
                    rows,
                    "Datastore import finished"
                );
            }
            Err(err) => {
                let message = format!(
                    "{} for resource with identifier \"{}\" and version \"{}\".",
                    err, resource.identifier, resource.version
                );
                error!(
                    resource_id = %resource.identifier,
                    version = %resource.version,
                    error = %err,
                    "Datastore import failed"
                );
                result.set_error(message);
            }
        }

        result
    }

    async fn import(&self, resource: &Resource) -> Result<u64> {
        enter(resource, ImportStage::ResolvingPath);
        let file_path = self.file_resolver.resolve(resource).ok_or_else(|| {
            AppError::PathResolutionError(format!(
                "Unable to resolve file name \"{}\"",
                resource.file_path
            ))
        })?;

        enter(resource, ImportStage::ReadingHeader);
        let analysis = analyze_file(&self.header_reader, &file_path)?;

        enter(resource, ImportStage::BuildingSchema);
        let storage = self.storage_factory.instance(resource).await?;
        if self.replace {
            storage.drop_table().await?;
        }
        storage.set_schema(&analysis.spec).await?;
        // Counting makes the storage create the physical table.
        storage.count().await?;

        enter(resource, ImportStage::LoadingData);
        let statement = LoadDataStatement::new(
            escape_string_literal(&file_path.to_string_lossy()),
            storage.table_name(),
            analysis.spec.names().into_iter().map(String::from).collect(),
            analysis.eol,
            analysis.header_line_count,
        )
        .with_local(self.local_infile);

        let mut session = self.connector.connect(&file_path).await?;
        let loaded = session.execute(&statement.to_sql()).await;
        if let Err(err) = session.close().await {
            warn!(
                resource_id = %resource.identifier,
                error = %err,
                "Failed to close bulk load connection"
            );
        }

        loaded
    }
}

/// Read a file's header and derive the load parameters from it.
pub fn analyze_file(header_reader: &CsvHeaderReader, path: &Path) -> Result<HeaderAnalysis> {
    let header = header_reader.read_file(path)?;

    let eol = Eol::detect_or_default(&header.raw);
    let header_line_count = eol.header_line_count(&header.raw);
    let spec = generate_table_spec(&header.columns)?;

    Ok(HeaderAnalysis {
        eol,
        header_line_count,
        spec,
    })
}

fn enter(resource: &Resource, stage: ImportStage) {
    debug!(
        resource_id = %resource.identifier,
        version = %resource.version,
        stage = ?stage,
        "Import stage"
    );
}
