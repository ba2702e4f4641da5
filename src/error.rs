//! Error type shared by table import, chart building and settings.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GanttError {
    /// A record whose arity does not match the fixed task-table layout.
    #[error("schema mismatch on line {line}: expected {expected} columns, found {found}")]
    SchemaMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, GanttError>;
