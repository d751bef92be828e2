//! Review loader error types.
//!
//! All errors are typed and provide root cause information.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for review loader operations.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// I/O error during file operations.
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Required configuration is missing or empty.
    #[error("Configuration error: {message}")]
    Config {
        /// What is missing.
        message: String,
    },

    /// The export has no lines past its two-line header.
    #[error("File {file} does not contain any records past the header")]
    NoRecords {
        /// The export file.
        file: PathBuf,
    },

    /// A line has too few fields for its record kind.
    #[error("Line {line}: expected field {index}, found only {found} fields")]
    MissingField {
        /// 1-based line number in the export.
        line: usize,
        /// 0-based index of the missing field.
        index: usize,
        /// Number of fields present on the line.
        found: usize,
    },

    /// A numeric field could not be parsed.
    #[error("Line {line}: {field} '{value}' is not a number: {message}")]
    InvalidNumber {
        /// 1-based line number in the export.
        line: usize,
        /// Field name (rating, num_ratings).
        field: &'static str,
        /// The raw field value.
        value: String,
        /// The parser's error message.
        message: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{operation} failed with status {status}: {body}")]
    Remote {
        /// The remote operation (e.g. `insert train_business`).
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// A row could not be encoded for sending.
    #[error("Could not encode row for {operation}: {message}")]
    Encode {
        /// The remote operation.
        operation: String,
        /// The encode error message.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("Could not decode response of {operation}: {message}")]
    Decode {
        /// The remote operation.
        operation: String,
        /// The decode error message.
        message: String,
    },

    /// An insert returned no records.
    #[error("{operation} returned no records")]
    EmptyResponse {
        /// The remote operation.
        operation: String,
    },

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

impl LoaderError {
    /// Stable identifier for this error, used in JSON payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            LoaderError::Io { .. } => "Io",
            LoaderError::Config { .. } => "Config",
            LoaderError::NoRecords { .. } => "NoRecords",
            LoaderError::MissingField { .. } => "MissingField",
            LoaderError::InvalidNumber { .. } => "InvalidNumber",
            LoaderError::Http(_) => "Http",
            LoaderError::Remote { .. } => "Remote",
            LoaderError::Encode { .. } => "Encode",
            LoaderError::Decode { .. } => "Decode",
            LoaderError::EmptyResponse { .. } => "EmptyResponse",
            LoaderError::Other(_) => "Other",
        }
    }

    /// Remediation hint, when one exists.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LoaderError::Config { .. } => Some(
                "Set FILE_PATH, SUPABASE_URL and SUPABASE_ANON in the environment or a .env file",
            ),
            LoaderError::NoRecords { .. } => {
                Some("The first two lines are treated as a header; add records after them")
            }
            LoaderError::MissingField { .. } => {
                Some("Fields must be separated by ' - ' (space, hyphen, space)")
            }
            _ => None,
        }
    }

    /// The file this error refers to, if any.
    pub fn file_path(&self) -> Option<&std::path::Path> {
        match self {
            LoaderError::Io { path, .. } => Some(path.as_path()),
            LoaderError::NoRecords { file } => Some(file.as_path()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Result type alias for review loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
