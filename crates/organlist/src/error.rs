//! Result and Error types for the organlist module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, organlist::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `penvox-organlist`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure reading a delimited table
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// The organlist file exists but could not be read
    #[error("failed to read organlist {path:?}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The audit echo could not be created or written
    #[error("failed to write organlist echo {path:?}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The organlist file does not exist
    #[error("organlist file {path:?} not found")]
    FileNotFound { path: PathBuf },

    /// A data row could not be understood
    #[error("malformed organlist row ({path:?}, line {line}): {reason}")]
    ParseError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Number of data rows differs from the number of organs expected
    #[error("unexpected number of organs in {path:?} (expected {expected}, found {found})")]
    RowCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// The same organ tag appears on more than one row
    #[error("organ id {organ_id} defined twice (lines {first_line} and {second_line})")]
    DuplicateOrganId {
        organ_id: u32,
        first_line: usize,
        second_line: usize,
    },

    /// A key column is not among the header names
    #[error("column \"{name}\" not found in headers {headers:?}")]
    MissingColumn { name: String, headers: Vec<String> },

    /// Delimiters must be a single byte for the csv reader
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),
}
