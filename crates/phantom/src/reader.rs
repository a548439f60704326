//! Read operations for raw phantom files
//!
//! Phantoms routinely hold tens of millions of voxels, so files are read in
//! one go and decoded in bulk. Binary files are widened byte-by-byte in a
//! single pass, ASCII files are tokenised and parsed in parallel with the
//! file order preserved.

// standard library
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};

// penvox modules
use penvox_format::{f, Thousands};

// external crates
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage format of the organ tags in a phantom file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One unsigned byte per voxel
    #[default]
    Binary,
    /// Whitespace separated integers
    Ascii,
}

impl FromStr for Encoding {
    type Err = String;

    /// Accepts the names, or `0` for binary and `1` for ascii
    ///
    /// ```rust
    /// # use penvox_phantom::Encoding;
    /// assert_eq!("binary".parse::<Encoding>(), Ok(Encoding::Binary));
    /// assert_eq!("0".parse::<Encoding>(), Ok(Encoding::Binary));
    /// assert_eq!("ASCII".parse::<Encoding>(), Ok(Encoding::Ascii));
    /// assert!("hex".parse::<Encoding>().is_err());
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binary" | "bin" | "0" => Ok(Encoding::Binary),
            "ascii" | "text" | "txt" | "1" => Ok(Encoding::Ascii),
            other => Err(f!("unknown phantom encoding \"{other}\"")),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Encoding::Binary => write!(f, "binary"),
            Encoding::Ascii => write!(f, "ascii"),
        }
    }
}

/// Read every organ tag from a phantom file
///
/// Returns exactly `total_voxels` organ ids in file order, or fails if the
/// file is missing, too short, too long, or not decodable.
///
/// ```rust, no_run
/// # use penvox_phantom::{read_phantom, Encoding};
/// // 299 x 137 x 348 voxels, one byte each
/// let organs = read_phantom("AM.dat", Encoding::Binary, 299 * 137 * 348).unwrap();
/// ```
pub fn read_phantom<P: AsRef<Path>>(
    path: P,
    encoding: Encoding,
    total_voxels: usize,
) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!(
        "Read {} bytes from {:?}, decoding as {encoding}",
        bytes.len().thousands(),
        path
    );

    let organs = match encoding {
        Encoding::Binary => decode_binary(&bytes, total_voxels)?,
        Encoding::Ascii => decode_ascii(&bytes, total_voxels)?,
    };

    info!("Loaded {} voxels from {:?}", organs.len().thousands(), path);
    Ok(organs)
}

/// Decode a byte-per-voxel stream
///
/// ```rust
/// # use penvox_phantom::{decode_binary, Error};
/// assert_eq!(decode_binary(&[0, 7, 255], 3).unwrap(), vec![0, 7, 255]);
/// assert!(matches!(decode_binary(&[0, 7], 3), Err(Error::TruncatedInput { .. })));
/// assert!(matches!(decode_binary(&[0, 7, 1, 1], 3), Err(Error::ExcessInput { .. })));
/// ```
pub fn decode_binary(bytes: &[u8], total_voxels: usize) -> Result<Vec<u32>> {
    use std::cmp::Ordering;

    match bytes.len().cmp(&total_voxels) {
        Ordering::Less => Err(Error::TruncatedInput {
            expected: total_voxels,
            found: bytes.len(),
        }),
        Ordering::Greater => Err(Error::ExcessInput {
            expected: total_voxels,
            found: bytes.len(),
        }),
        Ordering::Equal => Ok(bytes.iter().map(|&b| u32::from(b)).collect()),
    }
}

/// Decode whitespace separated integers
///
/// Line breaks carry no meaning, any number of values may appear on a line.
///
/// ```rust
/// # use penvox_phantom::{decode_ascii, Error};
/// assert_eq!(decode_ascii(b"1 1 2\n2  300\n", 5).unwrap(), vec![1, 1, 2, 2, 300]);
/// assert!(matches!(decode_ascii(b"1 1 2", 4), Err(Error::DecodeError(_))));
/// assert!(matches!(decode_ascii(b"1 x 2", 3), Err(Error::DecodeError(_))));
/// ```
pub fn decode_ascii(bytes: &[u8], total_voxels: usize) -> Result<Vec<u32>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::DecodeError(f!("content is not valid text ({e})")))?;

    let organs = match text
        .par_split_whitespace()
        .map(str::parse::<u32>)
        .collect::<std::result::Result<Vec<u32>, _>>()
    {
        Ok(organs) => organs,
        Err(_) => return Err(first_invalid_token(text)),
    };

    if organs.len() != total_voxels {
        return Err(Error::DecodeError(f!(
            "expected {total_voxels} organ ids but found {}",
            organs.len()
        )));
    }

    Ok(organs)
}

/// Locate the first bad token for a readable message, only on the error path
fn first_invalid_token(text: &str) -> Error {
    match text
        .split_whitespace()
        .enumerate()
        .find(|(_, token)| token.parse::<u32>().is_err())
    {
        Some((i, token)) => Error::DecodeError(f!(
            "value {} (\"{token}\") is not a non-negative integer organ id",
            i + 1
        )),
        None => Error::DecodeError("invalid organ id".to_string()),
    }
}
