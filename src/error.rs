use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    TaskNotFound,
    StorageError,
    WriteTooLarge,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::StorageError => "STORAGE_ERROR",
            Self::WriteTooLarge => "WRITE_TOO_LARGE",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskmanError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskmanError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("No task with id {id}"))
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn write_too_large(size: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::WriteTooLarge,
            format!("serialized task list is {size} bytes, over the {limit} byte limit; write abandoned"),
        )
    }
}

impl From<rusqlite::Error> for TaskmanError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<serde_json::Error> for TaskmanError {
    fn from(e: serde_json::Error) -> Self {
        Self::storage(e.to_string())
    }
}
