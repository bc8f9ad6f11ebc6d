use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading the dataset or serving the dashboard
///
/// `Io`, `Schema` and `Parse` only happen at startup and are fatal: the server
/// never starts without a dataset. `Render` and `Export` happen per request.
/// An empty filter result is not an error.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dataset file is missing or unreadable
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more required columns are absent from the header row
    #[error("dataset {path} is missing required column(s): {}", missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },

    /// A row could not be decoded into a medicine record
    #[error("invalid record in {path} at line {line}: {source}")]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Drawing a chart failed
    #[error("failed to render chart: {0}")]
    Render(String),

    /// Serializing the table for download failed
    #[error("failed to export table: {0}")]
    Export(String),

    /// Bad startup arguments
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
