use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::application::analyze_file;
use crate::domain::Resource;
use crate::infrastructure::bootstrap::build_import_use_case;
use crate::infrastructure::config::ImportConfig;
use crate::infrastructure::csv::CsvHeaderReader;

#[derive(Debug, Parser)]
#[command(
    name = "datastore-import",
    version,
    about = "Bulk-load CSV resources into MySQL datastore tables"
)]
pub struct Cli {
    /// Configuration file (defaults to ./datastore-import.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a CSV resource into its datastore table
    Import {
        /// Resource identifier
        #[arg(long)]
        identifier: String,

        /// Resource version
        #[arg(long = "resource-version")]
        resource_version: String,

        /// Drop the existing table first instead of appending to it
        #[arg(long)]
        replace: bool,

        /// File path or public:// URI of the CSV file
        path: String,
    },

    /// Print the table spec derived from a local CSV file's header
    Spec { path: PathBuf },
}

pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI, returning the process exit code.
pub async fn run(cli: Cli) -> i32 {
    let config = match ImportConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return 2;
        }
    };
    init_tracing(&config.log_filter);

    match cli.command {
        Command::Spec { path } => match analyze_file(&CsvHeaderReader::new(), &path) {
            Ok(analysis) => print_json(&analysis),
            Err(err) => {
                error!(path = %path.display(), error = %err, "Failed to analyze CSV header");
                1
            }
        },
        Command::Import {
            identifier,
            resource_version,
            replace,
            path,
        } => {
            let use_case = match build_import_use_case(&config).await {
                Ok(use_case) => use_case.with_replace(replace),
                Err(err) => {
                    error!(error = %err, "Failed to initialize importer");
                    return 1;
                }
            };

            let resource = Resource::new(identifier, resource_version, path);
            let result = use_case.run(&resource).await;
            let code = print_json(&result);
            if result.is_done() {
                code
            } else {
                1
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(err) => {
            error!(error = %err, "Failed to serialize output");
            1
        }
    }
}
