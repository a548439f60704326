//! Result and Error types for the phantom module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, phantom::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `penvox-phantom`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// The phantom file exists but could not be read
    #[error("failed to read phantom file {path:?}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The phantom file does not exist
    #[error("phantom file {path:?} not found")]
    FileNotFound { path: PathBuf },

    /// Binary stream ended before every voxel was read
    #[error("phantom ended early (expected {expected} voxels, found {found})")]
    TruncatedInput { expected: usize, found: usize },

    /// Binary stream holds more bytes than there are voxels
    #[error("phantom has too many values (expected {expected} voxels, found {found})")]
    ExcessInput { expected: usize, found: usize },

    /// ASCII content could not be decoded into the expected organ ids
    #[error("failed to decode ASCII phantom: {0}")]
    DecodeError(String),

    /// Every axis needs at least one voxel
    #[error("invalid phantom dimensions {nx}x{ny}x{nz}, all must be at least 1")]
    InvalidDimensions { nx: usize, ny: usize, nz: usize },

    /// The voxel count does not fit in memory addressing
    #[error("phantom dimensions {nx}x{ny}x{nz} give more voxels than can be addressed")]
    VoxelCountOverflow { nx: usize, ny: usize, nz: usize },

    /// Voxel sizes must be positive and finite
    #[error("invalid voxel pitch ({x}, {y}, {z}), all must be positive")]
    InvalidPitch { x: f64, y: f64, z: f64 },

    /// Organ id array does not match the dimensions
    #[error("inconsistent number of voxels (expected {expected}, found {found})")]
    VoxelCountMismatch { expected: usize, found: usize },
}
