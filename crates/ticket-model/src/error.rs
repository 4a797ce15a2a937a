use std::path::PathBuf;

use thiserror::Error;

/// Failures that can stop a report run or one of its stages.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("resource not found: {path}")]
    ResourceNotFound { path: PathBuf },

    #[error("file '{path}' is still open or inaccessible, please close it")]
    ResourceLocked { path: PathBuf },

    #[error("failed to read {path}: {message}")]
    ResourceReadError { path: PathBuf, message: String },

    #[error("column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error("processing failed: {0}")]
    Processing(String),
}

impl ReportError {
    pub fn read(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ResourceReadError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }

    /// Fatal errors abort the whole run; the rest can be isolated to a stage.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingColumn { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
