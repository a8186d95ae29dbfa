use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read environment table '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse environment table '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported environment table format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },

    #[error("environment '{environment}' maps to unknown column '{column}'")]
    UnknownColumn { environment: String, column: String },
}

impl TableError {
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn unknown_column(environment: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            environment: environment.into(),
            column: column.into(),
        }
    }
}
