//! Interfaces to the external decoding and conversion services.
//!
//! The locator never parses container bytes or converts pixels itself; it
//! talks to these two traits.

use std::borrow::Cow;

use super::kind::AuxiliaryDataKind;
use super::property::{PropertyDict, PropertyTree};
use super::record::AuxiliaryRecord;

// ============================================================================
// Container decoding
// ============================================================================

/// A decoded image container (JPEG, HEIF, DNG).
pub trait ImageSource: Send + Sync {
    /// Top-level properties of the whole source.
    ///
    /// Sources that keep the tree resident lend it; decoders that build it
    /// on demand return it owned.
    fn properties(&self) -> Cow<'_, PropertyTree>;

    /// Auxiliary info mapping of `kind` for the image at `index`.
    ///
    /// Returns `None` when the image carries no block of that kind; this is
    /// not an error.
    fn copy_auxiliary_info(&self, index: usize, kind: AuxiliaryDataKind) -> Option<PropertyDict>;
}

// ============================================================================
// Depth / disparity conversion
// ============================================================================

/// Converts between depth and disparity buffers.
///
/// Inputs are validated [`AuxiliaryRecord`]s; implementations may assume the
/// buffer matches its description.
pub trait DepthConverter: Send + Sync {
    /// Depth (or disparity, returned as-is in disparity form) to disparity.
    fn to_disparity(&self, record: &AuxiliaryRecord) -> AuxiliaryRecord;

    /// Disparity (or depth) to depth.
    fn to_depth(&self, record: &AuxiliaryRecord) -> AuxiliaryRecord;
}
