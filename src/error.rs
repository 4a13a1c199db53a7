use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Result file not found: {}", path.display())]
    MissingResults { path: PathBuf },

    #[error("Result file {} contains no records", path.display())]
    EmptyResults { path: PathBuf },

    #[error("Could not parse {}: {source}", path.display())]
    MalformedResults {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Required column '{column}' is missing from {}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid value '{value}' in column '{column}' at line {line}: expected {expected}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to draw {chart} chart: {message}")]
    Chart { chart: &'static str, message: String },
}

impl ReportError {
    /// Errors caused by the solver output not being there at all, as opposed
    /// to being there but broken.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            ReportError::MissingResults { .. } | ReportError::EmptyResults { .. }
        )
    }
}
