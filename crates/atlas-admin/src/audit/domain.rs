use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed vocabulary of failure titles recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorTitle {
    ErrorCreatingEvent,
    ErrorUpdatingApplicationStatus,
    ErrorRecordingAttendance,
}

impl ErrorTitle {
    pub const fn label(self) -> &'static str {
        match self {
            ErrorTitle::ErrorCreatingEvent => "ERROR_CREATING_EVENT",
            ErrorTitle::ErrorUpdatingApplicationStatus => "ERROR_UPDATING_APPLICATION_STATUS",
            ErrorTitle::ErrorRecordingAttendance => "ERROR_RECORDING_ATTENDANCE",
        }
    }
}

/// Severity classification of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogType {
    Error,
    Warning,
    Info,
}

/// One recorded failure. Entries are never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub title: ErrorTitle,
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn error(title: ErrorTitle, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title,
            log_type: LogType::Error,
            created_at: Utc::now(),
        }
    }
}
