//! Well-known property keys.
//!
//! Spellings follow the ImageIO dictionaries, which is what HEIF, JPEG and
//! DNG decoders on Apple platforms emit.

use serde::{Deserialize, Serialize};

/// Auxiliary info key for the raw data buffer.
pub const INFO_DATA_KEY: &str = "kCGImageAuxiliaryDataInfoData";

/// Auxiliary info key for the data description dictionary.
pub const INFO_DESCRIPTION_KEY: &str = "kCGImageAuxiliaryDataInfoDataDescription";

/// Auxiliary info key for the optional metadata.
pub const INFO_METADATA_KEY: &str = "kCGImageAuxiliaryDataInfoMetadata";

/// Description key for the buffer width in pixels.
pub const WIDTH_KEY: &str = "Width";

/// Description key for the buffer height in pixels.
pub const HEIGHT_KEY: &str = "Height";

/// Description key for the row stride in bytes.
pub const BYTES_PER_ROW_KEY: &str = "BytesPerRow";

/// Description key for the four-char pixel format code.
pub const PIXEL_FORMAT_KEY: &str = "PixelFormat";

/// Keys used to walk the top-level property tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyKeys {
    /// Top-level "file contents" dictionary.
    pub file_contents: String,
    /// List of per-image dictionaries inside file contents.
    pub images: String,
    /// Per-image list of auxiliary data descriptors.
    pub auxiliary_data: String,
    /// Type tag inside each auxiliary data descriptor.
    pub auxiliary_data_type: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            file_contents: "{FileContents}".to_string(),
            images: "Images".to_string(),
            auxiliary_data: "AuxiliaryData".to_string(),
            auxiliary_data_type: "AuxiliaryDataType".to_string(),
        }
    }
}
