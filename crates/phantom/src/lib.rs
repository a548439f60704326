//! Voxel phantom decoding, organ resolution and statistics
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod grid;
mod phantom;
mod reader;
mod resolver;
mod statistics;

// Inline anything important for a nice public API
#[doc(inline)]
pub use phantom::{Dimensions, Phantom, Pitch};

#[doc(inline)]
pub use reader::{decode_ascii, decode_binary, read_phantom, Encoding};

#[doc(inline)]
pub use grid::{ResolvedGrid, Voxel};

#[doc(inline)]
pub use resolver::resolve;

#[doc(inline)]
pub use statistics::Statistics;

#[doc(inline)]
pub use error::{Error, Result};
