// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Header row extraction for bulk imports

mod header_reader;

pub use header_reader::{CsvHeaderReader, HeaderRow};
