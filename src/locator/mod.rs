//! Auxiliary data lookup and depth/disparity normalization.
//!
//! All lookups read the image at [`PRIMARY_IMAGE_INDEX`] only. A container
//! whose top-level "file contents/images" path is missing is not something
//! this crate understands, and every lookup panics on it; use
//! [`AuxiliaryDataLocator::check_container`] to reject such input up front.
//! Any individual kind that is missing or fails to decode is reported as
//! `None`.

mod matte;

pub use matte::Matte;

use crate::config::LocatorConfig;
use crate::convert::ReciprocalConverter;
use crate::core::{
    AuxiliaryDataKind, AuxiliaryRecord, DepthConverter, ImageSource, MatteKind, PropertyDict,
    PropertyTree, PropertyValue,
};
use crate::util::{Error, Result};

/// Index of the only sub-image whose auxiliary data is consulted.
pub const PRIMARY_IMAGE_INDEX: usize = 0;

/// Depth-like data, tagged with the representation it is in.
#[derive(Clone, Debug, PartialEq)]
pub enum DepthRepresentation {
    Depth(AuxiliaryRecord),
    Disparity(AuxiliaryRecord),
}

impl DepthRepresentation {
    pub fn record(&self) -> &AuxiliaryRecord {
        match self {
            Self::Depth(r) | Self::Disparity(r) => r,
        }
    }

    pub fn into_record(self) -> AuxiliaryRecord {
        match self {
            Self::Depth(r) | Self::Disparity(r) => r,
        }
    }

    pub fn is_depth(&self) -> bool {
        matches!(self, Self::Depth(_))
    }

    pub fn is_disparity(&self) -> bool {
        matches!(self, Self::Disparity(_))
    }

    /// The auxiliary kind this representation corresponds to.
    pub fn kind(&self) -> AuxiliaryDataKind {
        match self {
            Self::Depth(_) => AuxiliaryDataKind::Depth,
            Self::Disparity(_) => AuxiliaryDataKind::Disparity,
        }
    }
}

/// Locates auxiliary records in an [`ImageSource`].
///
/// Holds only configuration and the converter; every call takes the source
/// explicitly, so one locator can serve any number of sources and threads.
#[derive(Clone, Debug, Default)]
pub struct AuxiliaryDataLocator<C = ReciprocalConverter> {
    converter: C,
    config: LocatorConfig,
}

impl AuxiliaryDataLocator {
    /// Locator with the default configuration and [`ReciprocalConverter`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: DepthConverter> AuxiliaryDataLocator<C> {
    /// Locator using a custom depth/disparity converter.
    pub fn with_converter(converter: C) -> Self {
        Self {
            converter,
            config: LocatorConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: LocatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    // ========================================================================
    // Container structure
    // ========================================================================

    /// Verify the source has a "file contents/images" list.
    ///
    /// Returns [`Error::MalformedContainer`] where the lookups would panic.
    pub fn check_container<S: ImageSource + ?Sized>(&self, source: &S) -> Result<()> {
        let tree = source.properties();
        self.images(&tree).map(|_| ())
    }

    fn images<'t>(&self, tree: &'t PropertyTree) -> Result<&'t [PropertyValue]> {
        let keys = &self.config.keys;
        let file_contents = tree.get_dict(&keys.file_contents).ok_or_else(|| {
            Error::malformed(format!("no '{}' dictionary", keys.file_contents))
        })?;
        file_contents.get_array(&keys.images).ok_or_else(|| {
            Error::malformed(format!("no '{}' list in '{}'", keys.images, keys.file_contents))
        })
    }

    fn ensure_container<S: ImageSource + ?Sized>(&self, source: &S) {
        if let Err(e) = self.check_container(source) {
            panic!("{e}");
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Auxiliary descriptors of the first image that has an auxiliary list.
    ///
    /// Images are scanned in order and the scan stops at the first one
    /// carrying the list. `None` when no image carries one.
    ///
    /// # Panics
    ///
    /// If the container has no "file contents/images" path.
    pub fn list_auxiliary_records<S: ImageSource + ?Sized>(
        &self,
        source: &S,
    ) -> Option<Vec<PropertyDict>> {
        let tree = source.properties();
        let images = match self.images(&tree) {
            Ok(images) => images,
            Err(e) => panic!("{e}"),
        };

        let list = images
            .iter()
            .filter_map(PropertyValue::as_dict)
            .find_map(|image| image.get_array(&self.config.keys.auxiliary_data))?;
        Some(list.iter().filter_map(PropertyValue::as_dict).cloned().collect())
    }

    /// Kinds announced by [`list_auxiliary_records`](Self::list_auxiliary_records).
    ///
    /// Unrecognised type tags are skipped.
    pub fn available_kinds<S: ImageSource + ?Sized>(&self, source: &S) -> Vec<AuxiliaryDataKind> {
        let tag_key = &self.config.keys.auxiliary_data_type;
        self.list_auxiliary_records(source)
            .unwrap_or_default()
            .iter()
            .filter_map(|d| d.get_str(tag_key))
            .filter_map(AuxiliaryDataKind::from_type_tag)
            .collect()
    }

    /// Record of `kind` in the primary image.
    ///
    /// # Panics
    ///
    /// If the container has no "file contents/images" path.
    pub fn find_record<S: ImageSource + ?Sized>(
        &self,
        source: &S,
        kind: AuxiliaryDataKind,
    ) -> Option<AuxiliaryRecord> {
        self.ensure_container(source);
        self.lookup(source, kind)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(kind = %kind))]
    fn lookup<S: ImageSource + ?Sized>(
        &self,
        source: &S,
        kind: AuxiliaryDataKind,
    ) -> Option<AuxiliaryRecord> {
        let Some(info) = source.copy_auxiliary_info(PRIMARY_IMAGE_INDEX, kind) else {
            tracing::debug!("not present");
            return None;
        };

        let record = match AuxiliaryRecord::from_info(&info) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "undecodable auxiliary block");
                return None;
            }
        };

        let format = record.description().pixel_format;
        let consistent = match kind {
            AuxiliaryDataKind::Depth => format.is_depth(),
            AuxiliaryDataKind::Disparity => format.is_disparity(),
            _ => true,
        };
        if !consistent {
            tracing::warn!(?format, "pixel format does not match auxiliary kind");
            return None;
        }

        let desc = record.description();
        tracing::debug!(width = desc.width, height = desc.height, ?format, "found");
        Some(record)
    }

    /// Disparity data, converted from depth when only depth is stored.
    ///
    /// Native disparity always wins over converted depth.
    ///
    /// # Panics
    ///
    /// If the container has no "file contents/images" path.
    pub fn resolve_disparity<S: ImageSource + ?Sized>(
        &self,
        source: &S,
    ) -> Option<DepthRepresentation> {
        self.resolve(source, AuxiliaryDataKind::Disparity)
    }

    /// Depth data, converted from disparity when only disparity is stored.
    ///
    /// Native depth always wins over converted disparity.
    ///
    /// # Panics
    ///
    /// If the container has no "file contents/images" path.
    pub fn resolve_depth<S: ImageSource + ?Sized>(&self, source: &S) -> Option<DepthRepresentation> {
        self.resolve(source, AuxiliaryDataKind::Depth)
    }

    fn resolve<S: ImageSource + ?Sized>(
        &self,
        source: &S,
        target: AuxiliaryDataKind,
    ) -> Option<DepthRepresentation> {
        self.ensure_container(source);

        let to_disparity = target == AuxiliaryDataKind::Disparity;
        let fallback = if to_disparity {
            AuxiliaryDataKind::Depth
        } else {
            AuxiliaryDataKind::Disparity
        };
        let wrap = |record| {
            if to_disparity {
                DepthRepresentation::Disparity(record)
            } else {
                DepthRepresentation::Depth(record)
            }
        };

        if let Some(native) = self.lookup(source, target) {
            return Some(wrap(native));
        }
        if !self.config.allow_conversion {
            return None;
        }

        let other = self.lookup(source, fallback)?;
        tracing::debug!(from = %fallback, to = %target, "converting");
        let converted = if to_disparity {
            self.converter.to_disparity(&other)
        } else {
            self.converter.to_depth(&other)
        };
        Some(wrap(converted))
    }

    /// Segmentation matte of `kind` in the primary image.
    ///
    /// A matte block that fails to decode is reported as `None`.
    ///
    /// # Panics
    ///
    /// If the container has no "file contents/images" path.
    pub fn find_matte<S: ImageSource + ?Sized>(&self, source: &S, kind: MatteKind) -> Option<Matte> {
        self.ensure_container(source);

        let info = source.copy_auxiliary_info(PRIMARY_IMAGE_INDEX, kind.into())?;
        match Matte::from_info(kind, &info) {
            Ok(matte) => Some(matte),
            Err(e) => {
                tracing::warn!(?kind, error = %e, "undecodable matte");
                None
            }
        }
    }
}

// ============================================================================
// Free functions with the default locator
// ============================================================================

/// [`AuxiliaryDataLocator::find_record`] with default settings.
pub fn find_record<S: ImageSource + ?Sized>(
    source: &S,
    kind: AuxiliaryDataKind,
) -> Option<AuxiliaryRecord> {
    AuxiliaryDataLocator::new().find_record(source, kind)
}

/// [`AuxiliaryDataLocator::resolve_disparity`] with default settings.
pub fn resolve_disparity<S: ImageSource + ?Sized>(source: &S) -> Option<DepthRepresentation> {
    AuxiliaryDataLocator::new().resolve_disparity(source)
}

/// [`AuxiliaryDataLocator::resolve_depth`] with default settings.
pub fn resolve_depth<S: ImageSource + ?Sized>(source: &S) -> Option<DepthRepresentation> {
    AuxiliaryDataLocator::new().resolve_depth(source)
}

/// [`AuxiliaryDataLocator::find_matte`] with default settings.
pub fn find_matte<S: ImageSource + ?Sized>(source: &S, kind: MatteKind) -> Option<Matte> {
    AuxiliaryDataLocator::new().find_matte(source, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataDescription, PixelFormat};
    use crate::source::MemorySource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(format: PixelFormat) -> AuxiliaryRecord {
        let desc = DataDescription::packed(1, 1, format);
        let data = match format.bytes_per_pixel() {
            1 => vec![200],
            2 => half::f16::from_f32(2.0).to_bits().to_le_bytes().to_vec(),
            _ => 2.0f32.to_le_bytes().to_vec(),
        };
        AuxiliaryRecord::new(data, desc, None).unwrap()
    }

    /// Counts conversions so tests can tell native from converted results.
    #[derive(Default)]
    struct CountingConverter(AtomicUsize);

    impl DepthConverter for CountingConverter {
        fn to_disparity(&self, record: &AuxiliaryRecord) -> AuxiliaryRecord {
            self.0.fetch_add(1, Ordering::Relaxed);
            ReciprocalConverter.to_disparity(record)
        }

        fn to_depth(&self, record: &AuxiliaryRecord) -> AuxiliaryRecord {
            self.0.fetch_add(1, Ordering::Relaxed);
            ReciprocalConverter.to_depth(record)
        }
    }

    #[test]
    fn test_native_skips_converter() {
        let source = MemorySource::builder()
            .image_with([
                (AuxiliaryDataKind::Depth, record(PixelFormat::DepthFloat32)),
                (AuxiliaryDataKind::Disparity, record(PixelFormat::DisparityFloat16)),
            ])
            .build();
        let locator = AuxiliaryDataLocator::with_converter(CountingConverter::default());

        assert!(locator.resolve_depth(&source).unwrap().is_depth());
        assert!(locator.resolve_disparity(&source).unwrap().is_disparity());
        assert_eq!(locator.converter().0.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_conversion_disabled() {
        let source = MemorySource::builder()
            .image_with([(AuxiliaryDataKind::Depth, record(PixelFormat::DepthFloat32))])
            .build();
        let config = LocatorConfig {
            allow_conversion: false,
            ..Default::default()
        };
        let locator = AuxiliaryDataLocator::new().with_config(config);

        assert!(locator.resolve_disparity(&source).is_none());
        assert!(locator.resolve_depth(&source).is_some());
    }

    #[test]
    fn test_mismatched_format_is_absent() {
        let source = MemorySource::builder()
            .image_with([(AuxiliaryDataKind::Depth, record(PixelFormat::DisparityFloat32))])
            .build();
        assert!(find_record(&source, AuxiliaryDataKind::Depth).is_none());
    }

    #[test]
    fn test_representation_accessors() {
        let rep = DepthRepresentation::Disparity(record(PixelFormat::DisparityFloat32));
        assert_eq!(rep.kind(), AuxiliaryDataKind::Disparity);
        assert!(!rep.is_depth());
        assert_eq!(rep.record().description().pixel_format, PixelFormat::DisparityFloat32);
        assert_eq!(rep.into_record(), record(PixelFormat::DisparityFloat32));
    }

    #[test]
    fn test_check_container_error() {
        let source = MemorySource::new(PropertyDict::new().with("{FileContents}", PropertyDict::new()));
        let err = AuxiliaryDataLocator::new().check_container(&source).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("Images"));
    }
}
