use std::path::PathBuf;
use thiserror::Error;

use super::IoError;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("failed to write CSV to '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("malformed coverage matrix in '{path}': {message}")]
    Malformed { path: PathBuf, message: String },
}

impl OutputError {
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}
