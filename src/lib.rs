//! `penvox` is a small toolkit for turning voxel phantoms into PENELOPE and
//! penEasy geometry inputs
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use penvox_format as format;

#[cfg(feature = "organlist")]
#[cfg_attr(docsrs, doc(cfg(feature = "organlist")))]
#[doc(inline)]
pub use penvox_organlist as organlist;

#[cfg(feature = "phantom")]
#[cfg_attr(docsrs, doc(cfg(feature = "phantom")))]
#[doc(inline)]
pub use penvox_phantom as phantom;

#[cfg(feature = "penelope")]
#[cfg_attr(docsrs, doc(cfg(feature = "penelope")))]
#[doc(inline)]
pub use penvox_penelope as penelope;
