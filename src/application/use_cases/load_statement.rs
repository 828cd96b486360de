// ============================================================
// LOAD DATA STATEMENT
// ============================================================
// Render the MySQL bulk-load command for a CSV resource

use crate::domain::Eol;

/// Hidden row identity column of every datastore table
pub const ROW_IDENTITY_COLUMN: &str = "record_number";

/// Parameters of a `LOAD DATA` statement.
///
/// `file_path` is inserted between single quotes verbatim; escaping it is
/// the caller's job (see [`escape_string_literal`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDataStatement {
    pub file_path: String,
    pub table_name: String,
    pub columns: Vec<String>,
    pub eol: Eol,
    pub header_line_count: usize,

    /// Read the file from the client (`LOCAL`) instead of the server host
    pub local: bool,
}

impl LoadDataStatement {
    pub fn new(
        file_path: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<String>,
        eol: Eol,
        header_line_count: usize,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            table_name: table_name.into(),
            columns,
            eol,
            header_line_count,
            local: true,
        }
    }

    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn to_sql(&self) -> String {
        let infile = if self.local {
            "LOAD DATA LOCAL INFILE"
        } else {
            "LOAD DATA INFILE"
        };

        [
            format!("{} '{}'", infile, self.file_path),
            format!("INTO TABLE {}", self.table_name),
            "FIELDS TERMINATED BY ','".to_string(),
            "OPTIONALLY ENCLOSED BY '\"'".to_string(),
            "ESCAPED BY ''".to_string(),
            format!("LINES TERMINATED BY '{}'", self.eol.sql_escape()),
            format!("IGNORE {} LINES", self.header_line_count),
            format!("({})", self.columns.join(",")),
            format!("SET {} = NULL;", ROW_IDENTITY_COLUMN),
        ]
        .join(" ")
    }
}

impl std::fmt::Display for LoadDataStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Escape text for use inside a single-quoted MySQL string literal.
pub fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\x1a' => escaped.push_str("\\Z"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_statement() {
        let statement = LoadDataStatement::new(
            "/var/files/data.csv",
            "datastore_abc",
            columns(&["name", "lon", "lat"]),
            Eol::Lf,
            1,
        );

        assert_eq!(
            statement.to_sql(),
            "LOAD DATA LOCAL INFILE '/var/files/data.csv' INTO TABLE datastore_abc \
             FIELDS TERMINATED BY ',' OPTIONALLY ENCLOSED BY '\"' ESCAPED BY '' \
             LINES TERMINATED BY '\\n' IGNORE 1 LINES (name,lon,lat) \
             SET record_number = NULL;"
        );
    }

    #[test]
    fn test_crlf_and_multi_line_header() {
        let sql = LoadDataStatement::new("/f.csv", "t", columns(&["a"]), Eol::CrLf, 3).to_sql();
        assert!(sql.contains(r"LINES TERMINATED BY '\r\n'"));
        assert!(sql.contains("IGNORE 3 LINES"));
    }

    #[test]
    fn test_server_side_load() {
        let sql = LoadDataStatement::new("/f.csv", "t", columns(&["a"]), Eol::Cr, 1)
            .with_local(false)
            .to_sql();
        assert!(sql.starts_with("LOAD DATA INFILE '/f.csv'"));
        assert!(sql.contains(r"LINES TERMINATED BY '\r'"));
    }

    #[test]
    fn test_escape_string_literal() {
        assert_eq!(escape_string_literal("/tmp/plain.csv"), "/tmp/plain.csv");
        assert_eq!(escape_string_literal("/tmp/o'brien.csv"), r"/tmp/o\'brien.csv");
        assert_eq!(escape_string_literal(r"C:\data\x.csv"), r"C:\\data\\x.csv");
    }
}
