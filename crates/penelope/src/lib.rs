//! PENELOPE/penEasy voxel geometry and GNUPLOT slice writers
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod builder;
mod config;
mod error;
mod pipeline;
mod projection;
mod vox;

// Inline anything important for a nice public API
#[doc(inline)]
pub use config::{Config, DensityPolicy, ProjectionPaths};

#[doc(inline)]
pub use builder::ConfigBuilder;

#[doc(inline)]
pub use vox::{write_vox, write_vox_to, VOX_HEADER_LINES};

#[doc(inline)]
pub use projection::{
    write_projection, write_projection_to, write_projections, NoProgress, Plane, SliceObserver,
};

#[doc(inline)]
pub use pipeline::{convert, count_lines, Report};

#[doc(inline)]
pub use error::{Error, Result};
