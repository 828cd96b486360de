pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use crate::application::{generate_table_spec, MysqlImportUseCase};
pub use crate::domain::error::{AppError, Result};
pub use crate::domain::{ImportResult, ImportStatus, Resource, TableSpec};
pub use crate::infrastructure::config::ImportConfig;
