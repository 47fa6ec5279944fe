//! Segmentation mattes.

use crate::core::{AuxiliaryRecord, MatteKind, PixelFormat, PropertyDict, PropertyValue};
use crate::util::{Error, Result};

/// An 8-bit single channel segmentation mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Matte {
    kind: MatteKind,
    record: AuxiliaryRecord,
}

impl Matte {
    /// Decode a matte from an auxiliary info mapping.
    pub fn from_info(kind: MatteKind, info: &PropertyDict) -> Result<Self> {
        Self::from_record(kind, AuxiliaryRecord::from_info(info)?)
    }

    /// Wrap a record; the pixel format must be `OneComponent8`.
    pub fn from_record(kind: MatteKind, record: AuxiliaryRecord) -> Result<Self> {
        let format = record.description().pixel_format;
        if format != PixelFormat::OneComponent8 {
            return Err(Error::UnsupportedPixelFormat(format.code()));
        }
        Ok(Self { kind, record })
    }

    pub fn kind(&self) -> MatteKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.record.description().width
    }

    pub fn height(&self) -> usize {
        self.record.description().height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.record.description().bytes_per_row
    }

    /// Mask values of row `y`, without padding.
    pub fn row(&self, y: usize) -> &[u8] {
        self.record.row(y)
    }

    pub fn metadata(&self) -> Option<&PropertyValue> {
        self.record.metadata()
    }

    pub fn record(&self) -> &AuxiliaryRecord {
        &self.record
    }

    pub fn into_record(self) -> AuxiliaryRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataDescription;

    #[test]
    fn test_matte_accessors() {
        let desc = DataDescription {
            width: 2,
            height: 2,
            bytes_per_row: 3,
            pixel_format: PixelFormat::OneComponent8,
        };
        let record = AuxiliaryRecord::new(vec![0, 255, 0, 128, 64, 0], desc, None).unwrap();
        let matte = Matte::from_info(MatteKind::PortraitEffects, &record.to_info()).unwrap();

        assert_eq!(matte.kind(), MatteKind::PortraitEffects);
        assert_eq!((matte.width(), matte.height(), matte.bytes_per_row()), (2, 2, 3));
        assert_eq!(matte.row(1), &[128, 64]);
        assert!(matte.metadata().is_none());
    }

    #[test]
    fn test_matte_rejects_float_buffer() {
        let desc = DataDescription::packed(1, 1, PixelFormat::DisparityFloat32);
        let record = AuxiliaryRecord::new(vec![0; 4], desc, None).unwrap();
        assert!(matches!(
            Matte::from_record(MatteKind::SemanticSegmentationHair, record),
            Err(Error::UnsupportedPixelFormat(_))
        ));
    }
}
