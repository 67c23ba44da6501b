/// Error types for loading and exporting the dashboard table
use thiserror::Error;

/// Main error type for data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Source file missing or unreadable, or export target not writable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected JSON layout not found
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// A required column is absent from the header
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A required numeric column holds something that is not a number
    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// File extension not recognised
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// Header present but no data rows
    #[error("Table has no data rows")]
    NoRows,
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
