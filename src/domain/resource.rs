use serde::{Deserialize, Serialize};

/// A versioned data resource whose file is being imported.
///
/// `file_path` may be a plain filesystem path or a virtual URI such as
/// `public://resources/data.csv`; it must be resolved before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub identifier: String,
    pub version: String,
    pub file_path: String,
}

impl Resource {
    pub fn new(
        identifier: impl Into<String>,
        version: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            version: version.into(),
            file_path: file_path.into(),
        }
    }

    /// Identifier that is unique across resource versions.
    pub fn unique_identifier(&self) -> String {
        format!("{}__{}", self.identifier, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_identifier_joins_identifier_and_version() {
        let resource = Resource::new("abc123", "1700000000", "public://a.csv");
        assert_eq!(resource.unique_identifier(), "abc123__1700000000");
    }
}
