//! # auxdepth
//!
//! Locate depth, disparity and segmentation-matte auxiliary data in decoded
//! image containers (JPEG, HEIF, DNG) and normalize between depth and
//! disparity.
//!
//! Container parsing and pixel conversion are external services behind the
//! [`ImageSource`](core::ImageSource) and [`DepthConverter`](core::DepthConverter)
//! traits. This crate only decides which auxiliary block to read and how to
//! fall back when the requested representation is not stored.
//!
//! ## Modules
//!
//! - [`util`] - Errors
//! - [`core`] - Property trees, records, kinds and service traits
//! - [`config`] - Locator configuration
//! - [`source`] - In-memory image source
//! - [`convert`] - Reference depth/disparity converter
//! - [`locator`] - Lookups and depth/disparity resolution
//!
//! ## Example
//!
//! ```ignore
//! use auxdepth::prelude::*;
//!
//! let source = MemorySource::new(tree);
//! if let Some(DepthRepresentation::Depth(depth)) = resolve_depth(&source) {
//!     println!("{}x{}", depth.description().width, depth.description().height);
//! }
//! ```

pub mod util;
pub mod core;
pub mod config;
pub mod source;
pub mod convert;
pub mod locator;

// Re-export commonly used types
pub use util::{Error, Result};
pub use config::LocatorConfig;
pub use locator::{AuxiliaryDataLocator, DepthRepresentation, Matte};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::config::LocatorConfig;
    pub use crate::core::{
        AuxiliaryDataKind, AuxiliaryRecord, DataDescription, DepthConverter, ImageSource,
        MatteKind, PixelFormat, PropertyDict, PropertyTree, PropertyValue,
    };
    pub use crate::source::MemorySource;
    pub use crate::convert::ReciprocalConverter;
    pub use crate::locator::{
        find_matte, find_record, resolve_depth, resolve_disparity, AuxiliaryDataLocator,
        DepthRepresentation, Matte,
    };
}
