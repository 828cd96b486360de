// Turns raw CSV header tokens into legal MySQL column identifiers.
//
// Names are a pure function of the header text and the names already taken,
// so re-importing the same file always yields the same columns.

use once_cell::sync::Lazy;
use regex::Regex;
use md5::{Digest, Md5};
use std::collections::HashSet;

use crate::domain::MAX_COLUMN_LENGTH;

/// Length of the content hash appended to truncated names
const HASH_LENGTH: usize = 4;

static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?: |\r\n|\r|\n)").unwrap());

static LINE_BREAK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

static UNSUPPORTED_CHARS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(?:e[0-9]+)?$").unwrap());

/// Reserved words of MySQL 5.6-8 and MariaDB
pub const RESERVED_WORDS: &[&str] = &[
    "accessible", "add", "all", "alter", "analyze", "and", "as", "asc", "asensitive", "before",
    "between", "bigint", "binary", "blob", "both", "by", "call", "cascade", "case", "change",
    "char", "character", "check", "collate", "column", "condition", "constraint", "continue",
    "convert", "create", "cross", "cube", "cume_dist", "current_date", "current_role",
    "current_time", "current_timestamp", "current_user", "cursor", "database", "databases",
    "day_hour", "day_microsecond", "day_minute", "day_second", "dec", "decimal", "declare",
    "default", "delayed", "delete", "dense_rank", "desc", "describe", "deterministic", "distinct",
    "distinctrow", "div", "do_domain_ids", "double", "drop", "dual", "each", "else", "elseif",
    "empty", "enclosed", "escaped", "except", "exists", "exit", "explain", "false", "fetch",
    "first_value", "float", "float4", "float8", "for", "force", "foreign", "from", "fulltext",
    "function", "general", "generated", "get", "grant", "group", "grouping", "groups", "having",
    "high_priority", "hour_microsecond", "hour_minute", "hour_second", "if", "ignore",
    "ignore_domain_ids", "ignore_server_ids", "in", "index", "infile", "inner", "inout",
    "insensitive", "insert", "int", "int1", "int2", "int3", "int4", "int8", "integer", "intersect",
    "interval", "into", "io_after_gtids", "io_before_gtids", "is", "iterate", "join", "json_table",
    "key", "keys", "kill", "lag", "last_value", "lateral", "lead", "leading", "leave", "left",
    "like", "limit", "linear", "lines", "load", "localtime", "localtimestamp", "lock", "long",
    "longblob", "longtext", "loop", "low_priority", "master_bind", "master_heartbeat_period",
    "master_ssl_verify_server_cert", "match", "maxvalue", "mediumblob", "mediumint", "mediumtext",
    "middleint", "minute_microsecond", "minute_second", "mod", "modifies", "natural", "not",
    "no_write_to_binlog", "nth_value", "ntile", "null", "numeric", "of", "offset", "on",
    "optimize", "optimizer_costs", "option", "optionally", "or", "order", "out", "outer",
    "outfile", "over", "page_checksum", "parse_vcol_expr", "partition", "percent_rank", "position",
    "precision", "primary", "procedure", "purge", "range", "rank", "read", "reads", "read_write",
    "real", "recursive", "references", "ref_system_id", "regexp", "release", "rename", "repeat",
    "replace", "require", "resignal", "restrict", "return", "returning", "revoke", "right",
    "rlike", "row", "row_number", "rows", "schema", "schemas", "second_microsecond", "select",
    "sensitive", "separator", "set", "show", "signal", "slow", "smallint", "spatial", "specific",
    "sql", "sql_big_result", "sql_calc_found_rows", "sqlexception", "sql_small_result", "sqlstate",
    "sqlwarning", "ssl", "starting", "stats_auto_recalc", "stats_persistent",
    "stats_sample_pages", "stored", "straight_join", "system", "table", "terminated", "then",
    "tinyblob", "tinyint", "tinytext", "to", "trailing", "trigger", "true", "undo", "union",
    "unique", "unlock", "unsigned", "update", "usage", "use", "using", "utc_date", "utc_time",
    "utc_timestamp", "values", "varbinary", "varchar", "varcharacter", "varying", "virtual",
    "when", "where", "while", "window", "with", "write", "xor", "year_month", "zerofill",
];

static RESERVED_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| RESERVED_WORDS.iter().copied().collect());

/// Case-insensitive reserved word lookup
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORD_SET.contains(word.to_ascii_lowercase().as_str())
}

/// Clean a header down to `[a-z0-9_]`, escaping numeric and reserved names.
///
/// No length limit is applied here; see [`truncate_header`].
pub fn sanitize_header(column: &str) -> String {
    let column = WHITESPACE_PATTERN.replace_all(column, "_");
    let column = UNSUPPORTED_CHARS_PATTERN.replace_all(&column, "");
    let column = column.trim_matches('_').to_ascii_lowercase();

    if NUMERIC_PATTERN.is_match(&column) || is_reserved_word(&column) {
        format!("_{}", column)
    } else {
        column
    }
}

/// Shorten an over-long name to the column limit.
///
/// The cut-off tail is replaced by `_` and the first hex digits of the MD5
/// of the full name, so distinct long headers stay distinct and match names
/// already created for the same header.
pub fn truncate_header(column: &str) -> String {
    if column.len() <= MAX_COLUMN_LENGTH {
        return column.to_string();
    }

    let hash = hex::encode(Md5::digest(column.as_bytes()));
    format!(
        "{}_{}",
        &column[..MAX_COLUMN_LENGTH - HASH_LENGTH - 1],
        &hash[..HASH_LENGTH]
    )
}

/// Suffix `_2`, `_3`, ... onto `column` until `is_taken` rejects it.
///
/// The base is cut short as needed so the suffixed name fits the limit.
pub fn deduplicate_header<F>(column: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !is_taken(column) {
        return column.to_string();
    }

    let mut index = 2usize;
    loop {
        let suffix = format!("_{}", index);
        let keep = column.len().min(MAX_COLUMN_LENGTH - suffix.len());
        let candidate = format!("{}{}", &column[..keep], suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Full naming pipeline for one header token
pub fn column_name_for<F>(raw: Option<&str>, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let name = truncate_header(&sanitize_header(raw.unwrap_or("")));
    deduplicate_header(&name, is_taken)
}

/// Flatten a possibly multi-line header into a single-line description.
pub fn sanitize_description(column: &str) -> String {
    LINE_BREAK_PATTERN
        .split(column)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
