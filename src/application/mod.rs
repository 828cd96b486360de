pub mod use_cases;

pub use use_cases::load_statement::LoadDataStatement;
pub use use_cases::mysql_import::{analyze_file, HeaderAnalysis, ImportStage, MysqlImportUseCase};
pub use use_cases::table_spec_builder::generate_table_spec;
