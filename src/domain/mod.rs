pub mod eol;
pub mod error;
pub mod import_result;
pub mod resource;
pub mod table_spec;

pub use eol::Eol;
pub use import_result::{ImportResult, ImportStatus};
pub use resource::Resource;
pub use table_spec::{ColumnSpec, FieldDefinition, FieldType, TableSpec, MAX_COLUMN_LENGTH};
