use std::path::PathBuf;

use tracing::debug;

use crate::domain::Resource;

const PUBLIC_SCHEME: &str = "public://";
const FILE_SCHEME: &str = "file://";

/// Maps a resource's (possibly virtual) file path to a real local path.
pub trait FileResolver {
    /// Returns `None` when the path cannot be resolved to an existing file.
    fn resolve(&self, resource: &Resource) -> Option<PathBuf>;
}

/// Resolves plain paths, `file://` URIs and `public://` URIs rooted at a
/// configured files directory.
pub struct LocalFileResolver {
    files_root: PathBuf,
}

impl LocalFileResolver {
    pub fn new(files_root: impl Into<PathBuf>) -> Self {
        Self {
            files_root: files_root.into(),
        }
    }

    fn to_local_path(&self, file_path: &str) -> Option<PathBuf> {
        if let Some(relative) = file_path.strip_prefix(PUBLIC_SCHEME) {
            Some(self.files_root.join(relative.trim_start_matches('/')))
        } else if let Some(absolute) = file_path.strip_prefix(FILE_SCHEME) {
            Some(PathBuf::from(absolute))
        } else if file_path.contains("://") {
            // Remote or unknown scheme; fetching is not our job.
            None
        } else {
            Some(PathBuf::from(file_path))
        }
    }
}

impl FileResolver for LocalFileResolver {
    fn resolve(&self, resource: &Resource) -> Option<PathBuf> {
        let candidate = self.to_local_path(&resource.file_path)?;
        let real_path = std::fs::canonicalize(&candidate).ok()?;

        if resource.file_path.starts_with(PUBLIC_SCHEME) {
            let root = std::fs::canonicalize(&self.files_root).ok()?;
            if !real_path.starts_with(&root) {
                debug!(
                    file_path = %resource.file_path,
                    "Resolved path escapes the public files directory"
                );
                return None;
            }
        }

        if !real_path.is_file() {
            return None;
        }

        Some(real_path)
    }
}
