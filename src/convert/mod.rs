//! Reference depth/disparity converter.
//!
//! Disparity here is plain inverse depth (1/m). Real pipelines scale by the
//! stereo baseline and focal length, which cancels out in a round trip and
//! is left to converters that know the camera calibration.

use byteorder::{ByteOrder, LittleEndian};
use half::f16;

use crate::core::{AuxiliaryRecord, DataDescription, DepthConverter, PixelFormat};

/// Per-pixel reciprocal converter for f16/f32 depth and disparity buffers.
///
/// Precision is preserved (half stays half). Row padding in the output is
/// zeroed. Non-positive and non-finite inputs have no meaningful inverse and
/// become NaN. Metadata is not carried over.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReciprocalConverter;

impl ReciprocalConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert(&self, record: &AuxiliaryRecord, target: Option<PixelFormat>) -> AuxiliaryRecord {
        let desc = *record.description();
        let target = match target {
            Some(t) if t != desc.pixel_format => t,
            // already in the requested form, or not depth-like at all
            _ => return record.clone(),
        };
        tracing::trace!(from = ?desc.pixel_format, to = ?target, width = desc.width, height = desc.height, "convert");

        let out_desc = DataDescription {
            pixel_format: target,
            ..desc
        };
        let row_len = desc.width * desc.pixel_format.bytes_per_pixel();
        // same geometry, so the validated input length covers every row
        let mut out = vec![0u8; record.data().len()];

        for y in 0..desc.height {
            let src = record.row(y);
            let start = y * desc.bytes_per_row;
            let dst = &mut out[start..start + row_len];
            match desc.pixel_format.bytes_per_pixel() {
                2 => {
                    for (s, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(2)) {
                        let v = f16::from_bits(LittleEndian::read_u16(s)).to_f32();
                        LittleEndian::write_u16(d, f16::from_f32(reciprocal(v)).to_bits());
                    }
                }
                _ => {
                    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
                        LittleEndian::write_f32(d, reciprocal(LittleEndian::read_f32(s)));
                    }
                }
            }
        }

        AuxiliaryRecord::new_unchecked(out, out_desc, None)
    }
}

impl DepthConverter for ReciprocalConverter {
    fn to_disparity(&self, record: &AuxiliaryRecord) -> AuxiliaryRecord {
        self.convert(record, record.description().pixel_format.as_disparity())
    }

    fn to_depth(&self, record: &AuxiliaryRecord) -> AuxiliaryRecord {
        self.convert(record, record.description().pixel_format.as_depth())
    }
}

#[inline]
fn reciprocal(v: f32) -> f32 {
    if v > 0.0 && v.is_finite() {
        1.0 / v
    } else {
        f32::NAN
    }
}

/// Decode every pixel of a depth-like record to f32, row by row.
pub fn pixels_f32(record: &AuxiliaryRecord) -> Vec<f32> {
    let desc = record.description();
    let mut out = Vec::with_capacity(desc.width * desc.height);
    for y in 0..desc.height {
        let row = record.row(y);
        match desc.pixel_format.bytes_per_pixel() {
            1 => out.extend(row.iter().map(|&b| b as f32 / 255.0)),
            2 => out.extend(
                row.chunks_exact(2)
                    .map(|s| f16::from_bits(LittleEndian::read_u16(s)).to_f32()),
            ),
            _ => out.extend(row.chunks_exact(4).map(LittleEndian::read_f32)),
        }
    }
    out
}
