//! Result and Error types for the penelope module

// standard library
use std::path::{Path, PathBuf};

/// Type alias for `Result<T, penelope::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `penvox-penelope`
pub enum Error {
    /// Underlying I/O error on a writer with no known path
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// An input file could not be opened or read
    #[error("failed to read {path:?}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An output file could not be created or written
    #[error("failed to write {path:?}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failure parsing a JSON configuration file
    #[error("invalid JSON configuration in {path:?}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failure loading the organlist
    #[error(transparent)]
    Organlist(#[from] penvox_organlist::Error),

    /// Failure reading or resolving the phantom
    #[error(transparent)]
    Phantom(#[from] penvox_phantom::Error),

    /// A configuration value is unusable, found before any file is touched
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The organlist has negative densities and the policy is to abort
    #[error("{count} organs have negative densities {organs:?}, use absolute densities to continue")]
    NegativeDensity { count: usize, organs: Vec<u32> },
}

impl Error {
    /// Attach the output path to a bare I/O error
    pub(crate) fn writing(self, path: &Path) -> Self {
        match self {
            Error::IOError(source) => Error::FileWrite {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}
