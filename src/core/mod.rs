//! Core layer - property trees, auxiliary records and service traits.
//!
//! This module provides:
//! - [`PropertyTree`] / [`PropertyValue`] - Decoded container metadata
//! - [`AuxiliaryDataKind`] / [`MatteKind`] - Auxiliary block type tags
//! - [`PixelFormat`] / [`DataDescription`] - Buffer layout
//! - [`AuxiliaryRecord`] - A validated auxiliary data block
//! - [`ImageSource`] / [`DepthConverter`] - External service interfaces

mod property;
mod kind;
mod pixel;
mod record;
mod traits;
pub mod keys;

pub use property::{PropertyTree, PropertyDict, PropertyValue};
pub use kind::{AuxiliaryDataKind, MatteKind};
pub use pixel::{PixelFormat, DataDescription};
pub use record::AuxiliaryRecord;
pub use keys::PropertyKeys;
pub use traits::{ImageSource, DepthConverter};
