use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    PathResolutionError(String),
    FileAccessError(String),
    SchemaConflictError(String),
    BulkLoadExecutionError(String),
    DatabaseError(String),
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::PathResolutionError(msg) => write!(f, "Path resolution error: {}", msg),
            AppError::FileAccessError(msg) => write!(f, "File access error: {}", msg),
            AppError::SchemaConflictError(msg) => write!(f, "Schema conflict: {}", msg),
            AppError::BulkLoadExecutionError(msg) => write!(f, "Bulk load failed: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

pub type Result<T> = std::result::Result<T, AppError>;
