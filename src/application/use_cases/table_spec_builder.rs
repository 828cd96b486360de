use crate::application::use_cases::header_sanitizer::{column_name_for, sanitize_description};
use crate::domain::error::Result;
use crate::domain::{ColumnSpec, TableSpec};

/// Build the datastore table spec for a list of raw CSV headers.
///
/// Columns come out in header order; each header is named against the
/// columns assigned before it, so later duplicates get numeric suffixes.
pub fn generate_table_spec<S: AsRef<str>>(headers: &[Option<S>]) -> Result<TableSpec> {
    let mut spec = TableSpec::new();

    for header in headers {
        let raw: Option<&str> = header.as_ref().map(|h| h.as_ref());
        let name = column_name_for(raw, |candidate| spec.contains(candidate));
        let description = sanitize_description(raw.unwrap_or(""));
        spec.push(ColumnSpec::text(name, description))?;
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldType, MAX_COLUMN_LENGTH};
    use std::collections::HashSet;

    fn headers(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_basic_headers() {
        let spec = generate_table_spec(&headers(&["Name", "Lon", "Lat"])).unwrap();
        assert_eq!(spec.names(), vec!["name", "lon", "lat"]);

        let name = spec.get("name").unwrap();
        assert_eq!(name.field_type, FieldType::Text);
        assert_eq!(name.description, "Name");
    }

    #[test]
    fn test_colliding_headers_get_suffixes() {
        let spec = generate_table_spec(&headers(&["Cost ($)", "Cost!", "cost"])).unwrap();
        assert_eq!(spec.names(), vec!["cost", "cost_2", "cost_3"]);
        assert_eq!(spec.get("cost_2").unwrap().description, "Cost!");
    }

    #[test]
    fn test_reserved_and_numeric_headers() {
        let spec = generate_table_spec(&headers(&["select", "123"])).unwrap();
        assert_eq!(spec.names(), vec!["_select", "_123"]);
    }

    #[test]
    fn test_null_and_empty_headers() {
        let input: Vec<Option<&str>> = vec![None, Some(""), Some("!!")];
        let spec = generate_table_spec(&input).unwrap();
        assert_eq!(spec.names(), vec!["", "_2", "_3"]);
    }

    #[test]
    fn test_multiline_header_description() {
        let spec = generate_table_spec(&headers(&["Total\nPopulation "])).unwrap();
        assert_eq!(spec.names(), vec!["total_population"]);
        assert_eq!(
            spec.get("total_population").unwrap().description,
            "Total Population"
        );
    }

    #[test]
    fn test_long_colliding_headers_stay_within_limit() {
        let long = "Very long column header ".repeat(5);
        let spec = generate_table_spec(&headers(&[&long, &long, &long])).unwrap();

        let names = spec.names();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 3);
        assert!(names.iter().all(|n| n.len() <= MAX_COLUMN_LENGTH));
        assert!(names[1].ends_with("_2"));
        assert!(names[2].ends_with("_3"));
    }

    #[test]
    fn test_deterministic() {
        let input = headers(&["A b", "a-b", "Ünïcode", "2019", "from"]);
        let first = generate_table_spec(&input).unwrap();
        let second = generate_table_spec(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_names_within_limit() {
        let input = headers(&[
            "id",
            "Station Name",
            "Observed At (UTC)",
            "Temperature °C",
            &"x".repeat(200),
        ]);
        let spec = generate_table_spec(&input).unwrap();

        let names = spec.names();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
        assert!(names.iter().all(|n| n.len() <= MAX_COLUMN_LENGTH));
    }
}
