pub mod header_sanitizer;
pub mod load_statement;
pub mod mysql_import;
pub mod table_spec_builder;
