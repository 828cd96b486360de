use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Pending,
    InProgress,
    Done,
    Error,
}

impl ImportStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStatus::Done | ImportStatus::Error)
    }
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStatus::Pending => write!(f, "pending"),
            ImportStatus::InProgress => write!(f, "in_progress"),
            ImportStatus::Done => write!(f, "done"),
            ImportStatus::Error => write!(f, "error"),
        }
    }
}

/// Outcome of a single import, persisted by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub status: ImportStatus,
    pub message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for ImportResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportResult {
    pub fn new() -> Self {
        Self {
            status: ImportStatus::Pending,
            message: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn start(&mut self) {
        self.status = ImportStatus::InProgress;
        self.started_at = Some(Utc::now());
    }

    pub fn set_status(&mut self, status: ImportStatus) {
        self.status = status;
        if status.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.set_status(ImportStatus::Error);
    }

    pub fn is_done(&self) -> bool {
        self.status == ImportStatus::Done
    }
}
