//! Organ to material and density lookup tables
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod builder;
mod error;
mod format;
mod reader;
mod table;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use format::{Layout, OrganlistFormat};

#[doc(inline)]
pub use builder::OrganlistFormatBuilder;

#[doc(inline)]
pub use table::{Organ, OrganTable};

#[doc(inline)]
pub use writer::{write_audit, write_audit_to};

#[doc(inline)]
pub use error::{Error, Result};
