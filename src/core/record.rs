//! Auxiliary data records.

use super::keys::{INFO_DATA_KEY, INFO_DESCRIPTION_KEY, INFO_METADATA_KEY};
use super::pixel::DataDescription;
use super::property::{PropertyDict, PropertyValue};
use crate::util::{Error, Result};

/// One auxiliary data block: pixel buffer, its description and optional
/// metadata.
///
/// Construction validates that the buffer is large enough for the
/// description, so consumers can index rows without further checks.
#[derive(Clone, Debug, PartialEq)]
pub struct AuxiliaryRecord {
    data: Vec<u8>,
    description: DataDescription,
    metadata: Option<PropertyValue>,
}

impl AuxiliaryRecord {
    /// Create a record, checking the buffer against the description.
    pub fn new(
        data: Vec<u8>,
        description: DataDescription,
        metadata: Option<PropertyValue>,
    ) -> Result<Self> {
        description.validate()?;
        let expected = description
            .required_len()
            .ok_or_else(|| Error::invalid("buffer length overflows"))?;
        if data.len() < expected {
            return Err(Error::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            description,
            metadata,
        })
    }

    /// Caller guarantees `data` satisfies `description`.
    pub(crate) fn new_unchecked(
        data: Vec<u8>,
        description: DataDescription,
        metadata: Option<PropertyValue>,
    ) -> Self {
        debug_assert!(description.required_len().is_some_and(|n| data.len() >= n));
        Self {
            data,
            description,
            metadata,
        }
    }

    /// Decode an auxiliary info mapping as returned by
    /// [`ImageSource::copy_auxiliary_info`](crate::core::ImageSource::copy_auxiliary_info).
    pub fn from_info(info: &PropertyDict) -> Result<Self> {
        let data = info
            .get(INFO_DATA_KEY)
            .ok_or_else(|| Error::missing(INFO_DATA_KEY))?
            .as_data()
            .ok_or_else(|| Error::TypeMismatch {
                key: INFO_DATA_KEY.to_string(),
                expected: "data",
            })?;
        let description = info
            .get(INFO_DESCRIPTION_KEY)
            .ok_or_else(|| Error::missing(INFO_DESCRIPTION_KEY))?
            .as_dict()
            .ok_or_else(|| Error::TypeMismatch {
                key: INFO_DESCRIPTION_KEY.to_string(),
                expected: "dict",
            })?;
        let metadata = info
            .get(INFO_METADATA_KEY)
            .filter(|v| !matches!(v, PropertyValue::Null))
            .cloned();

        Self::new(data.to_vec(), DataDescription::from_dict(description)?, metadata)
    }

    /// Encode back into an auxiliary info mapping.
    pub fn to_info(&self) -> PropertyDict {
        let mut info = PropertyDict::new()
            .with(INFO_DATA_KEY, self.data.clone())
            .with(INFO_DESCRIPTION_KEY, self.description);
        if let Some(metadata) = &self.metadata {
            info.set(INFO_METADATA_KEY, metadata.clone());
        }
        info
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn description(&self) -> &DataDescription {
        &self.description
    }

    pub fn metadata(&self) -> Option<&PropertyValue> {
        self.metadata.as_ref()
    }

    /// Bytes of row `y`, excluding padding. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[u8] {
        let d = &self.description;
        let start = y * d.bytes_per_row;
        &self.data[start..start + d.width * d.pixel_format.bytes_per_pixel()]
    }

    /// Split into buffer, description and metadata.
    pub fn into_parts(self) -> (Vec<u8>, DataDescription, Option<PropertyValue>) {
        (self.data, self.description, self.metadata)
    }
}
