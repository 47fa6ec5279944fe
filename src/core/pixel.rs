//! Pixel formats and buffer descriptions for auxiliary data.

use super::keys::{BYTES_PER_ROW_KEY, HEIGHT_KEY, PIXEL_FORMAT_KEY, WIDTH_KEY};
use super::property::{PropertyDict, PropertyValue};
use crate::util::{Error, Result};

const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

/// Pixel layout of an auxiliary buffer, identified by its four-char code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// 'hdis' - half float disparity
    DisparityFloat16 = fourcc(b"hdis"),
    /// 'fdis' - float disparity
    DisparityFloat32 = fourcc(b"fdis"),
    /// 'hdep' - half float depth in meters
    DepthFloat16 = fourcc(b"hdep"),
    /// 'fdep' - float depth in meters
    DepthFloat32 = fourcc(b"fdep"),
    /// 'L008' - 8-bit single channel, used by mattes
    OneComponent8 = fourcc(b"L008"),
}

impl PixelFormat {
    /// Four-char code as an integer.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Parse a four-char code.
    pub fn from_code(code: u32) -> Result<Self> {
        Ok(match code {
            c if c == Self::DisparityFloat16.code() => Self::DisparityFloat16,
            c if c == Self::DisparityFloat32.code() => Self::DisparityFloat32,
            c if c == Self::DepthFloat16.code() => Self::DepthFloat16,
            c if c == Self::DepthFloat32.code() => Self::DepthFloat32,
            c if c == Self::OneComponent8.code() => Self::OneComponent8,
            c => return Err(Error::UnsupportedPixelFormat(c)),
        })
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::DisparityFloat16 | Self::DepthFloat16 => 2,
            Self::DisparityFloat32 | Self::DepthFloat32 => 4,
            Self::OneComponent8 => 1,
        }
    }

    pub const fn is_disparity(self) -> bool {
        matches!(self, Self::DisparityFloat16 | Self::DisparityFloat32)
    }

    pub const fn is_depth(self) -> bool {
        matches!(self, Self::DepthFloat16 | Self::DepthFloat32)
    }

    /// Disparity format of the same precision. `None` for mattes.
    pub const fn as_disparity(self) -> Option<Self> {
        match self {
            Self::DisparityFloat16 | Self::DepthFloat16 => Some(Self::DisparityFloat16),
            Self::DisparityFloat32 | Self::DepthFloat32 => Some(Self::DisparityFloat32),
            Self::OneComponent8 => None,
        }
    }

    /// Depth format of the same precision. `None` for mattes.
    pub const fn as_depth(self) -> Option<Self> {
        match self {
            Self::DisparityFloat16 | Self::DepthFloat16 => Some(Self::DepthFloat16),
            Self::DisparityFloat32 | Self::DepthFloat32 => Some(Self::DepthFloat32),
            Self::OneComponent8 => None,
        }
    }
}

/// Geometry and format of an auxiliary buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataDescription {
    pub width: usize,
    pub height: usize,
    /// Row stride; may exceed `width * bytes_per_pixel` when rows are padded.
    pub bytes_per_row: usize,
    pub pixel_format: PixelFormat,
}

impl DataDescription {
    /// Tightly packed description.
    pub fn packed(width: usize, height: usize, pixel_format: PixelFormat) -> Self {
        Self {
            width,
            height,
            bytes_per_row: width.saturating_mul(pixel_format.bytes_per_pixel()),
            pixel_format,
        }
    }

    /// Minimum buffer length this description requires, `None` on overflow.
    pub fn required_len(&self) -> Option<usize> {
        self.bytes_per_row.checked_mul(self.height)
    }

    /// Check the fields are self-consistent.
    ///
    /// A valid description's buffer length fits in an `i64`, so every field
    /// can be written back to a property dictionary unchanged.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(format!(
                "empty buffer {}x{}",
                self.width, self.height
            )));
        }
        let min_row = self
            .width
            .checked_mul(self.pixel_format.bytes_per_pixel())
            .ok_or_else(|| Error::invalid(format!("row of {} pixels overflows", self.width)))?;
        if self.bytes_per_row < min_row {
            return Err(Error::invalid(format!(
                "bytes per row {} below minimum {}",
                self.bytes_per_row, min_row
            )));
        }
        match self.required_len().map(i64::try_from) {
            Some(Ok(_)) => Ok(()),
            _ => Err(Error::invalid(format!(
                "buffer of {} rows of {} bytes overflows",
                self.height, self.bytes_per_row
            ))),
        }
    }

    /// Parse from a description dictionary.
    pub fn from_dict(dict: &PropertyDict) -> Result<Self> {
        let desc = Self {
            width: read_usize(dict, WIDTH_KEY)?,
            height: read_usize(dict, HEIGHT_KEY)?,
            bytes_per_row: read_usize(dict, BYTES_PER_ROW_KEY)?,
            pixel_format: PixelFormat::from_code(read_u32(dict, PIXEL_FORMAT_KEY)?)?,
        };
        desc.validate()?;
        Ok(desc)
    }

    /// Serialize to a description dictionary.
    pub fn to_dict(&self) -> PropertyDict {
        PropertyDict::new()
            .with(WIDTH_KEY, to_i64(self.width))
            .with(HEIGHT_KEY, to_i64(self.height))
            .with(BYTES_PER_ROW_KEY, to_i64(self.bytes_per_row))
            .with(PIXEL_FORMAT_KEY, self.pixel_format.code())
    }
}

/// Lossless for validated descriptions; anything larger saturates.
fn to_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn read_i64(dict: &PropertyDict, key: &str) -> Result<i64> {
    let value = dict.get(key).ok_or_else(|| Error::missing(key))?;
    value.as_i64().ok_or_else(|| Error::TypeMismatch {
        key: key.to_string(),
        expected: "integer",
    })
}

fn read_usize(dict: &PropertyDict, key: &str) -> Result<usize> {
    let v = read_i64(dict, key)?;
    usize::try_from(v).map_err(|_| Error::invalid(format!("{key} is negative: {v}")))
}

fn read_u32(dict: &PropertyDict, key: &str) -> Result<u32> {
    let v = read_i64(dict, key)?;
    u32::try_from(v).map_err(|_| Error::invalid(format!("{key} out of range: {v}")))
}

impl From<DataDescription> for PropertyValue {
    fn from(desc: DataDescription) -> Self {
        Self::Dict(desc.to_dict())
    }
}
