// ============================================================
// TABLE SPEC
// ============================================================
// Ordered column definitions for a datastore table

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

use super::error::{AppError, Result};

/// Maximum length of a MySQL column identifier
pub const MAX_COLUMN_LENGTH: usize = 64;

/// Storage type of an imported column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
}

impl FieldType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
        }
    }
}

/// Storage definition of a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Original header text, flattened to a single line
    pub description: String,
}

/// A sanitized column together with its definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub definition: FieldDefinition,
}

impl ColumnSpec {
    pub fn text(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: FieldDefinition {
                field_type: FieldType::Text,
                description: description.into(),
            },
        }
    }
}

/// Ordered mapping from column name to field definition.
///
/// Insertion order is the positional binding order of the source file's
/// columns and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSpec {
    columns: Vec<ColumnSpec>,
    names: HashSet<String>,
}

impl TableSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, rejecting duplicate or over-long names.
    pub fn push(&mut self, column: ColumnSpec) -> Result<()> {
        if column.name.len() > MAX_COLUMN_LENGTH {
            return Err(AppError::SchemaConflictError(format!(
                "Column name \"{}\" exceeds {} characters",
                column.name, MAX_COLUMN_LENGTH
            )));
        }
        if !self.names.insert(column.name.clone()) {
            return Err(AppError::SchemaConflictError(format!(
                "Duplicate column name \"{}\"",
                column.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.definition)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in binding order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for TableSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.definition)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut spec = TableSpec::new();
        spec.push(ColumnSpec::text("zeta", "Zeta")).unwrap();
        spec.push(ColumnSpec::text("alpha", "Alpha")).unwrap();

        assert_eq!(spec.names(), vec!["zeta", "alpha"]);
        assert_eq!(spec.get("alpha").unwrap().description, "Alpha");
    }

    #[test]
    fn test_push_rejects_duplicate() {
        let mut spec = TableSpec::new();
        spec.push(ColumnSpec::text("cost", "Cost")).unwrap();
        let err = spec.push(ColumnSpec::text("cost", "Cost!")).unwrap_err();
        assert!(matches!(err, AppError::SchemaConflictError(_)));
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_push_rejects_long_name() {
        let mut spec = TableSpec::new();
        let err = spec.push(ColumnSpec::text("a".repeat(65), "")).unwrap_err();
        assert!(matches!(err, AppError::SchemaConflictError(_)));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut spec = TableSpec::new();
        spec.push(ColumnSpec::text("name", "Name")).unwrap();
        spec.push(ColumnSpec::text("lat", "Lat")).unwrap();

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(
            json,
            r#"{"name":{"type":"text","description":"Name"},"lat":{"type":"text","description":"Lat"}}"#
        );
    }
}
