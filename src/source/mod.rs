//! In-memory image source.
//!
//! [`MemorySource`] serves an already-decoded property tree. Each image's
//! auxiliary list holds descriptor dictionaries tagged with
//! `AuxiliaryDataType`; the remaining keys of a descriptor form the info
//! mapping handed out by [`ImageSource::copy_auxiliary_info`].

use std::borrow::Cow;

use crate::config::LocatorConfig;
use crate::core::{
    AuxiliaryDataKind, AuxiliaryRecord, ImageSource, PropertyDict, PropertyKeys, PropertyTree,
    PropertyValue,
};

/// Image source backed by a property tree held in memory.
#[derive(Clone, Debug)]
pub struct MemorySource {
    tree: PropertyTree,
    keys: PropertyKeys,
}

impl MemorySource {
    /// Wrap a tree that uses the default key spellings.
    pub fn new(tree: PropertyTree) -> Self {
        Self::with_keys(tree, PropertyKeys::default())
    }

    /// Wrap a tree that uses custom key spellings.
    ///
    /// The locator reading this source must be configured with the same
    /// keys; prefer [`with_config`](Self::with_config).
    pub fn with_keys(tree: PropertyTree, keys: PropertyKeys) -> Self {
        Self { tree, keys }
    }

    /// Wrap a tree using the key spellings of the locator's config.
    pub fn with_config(tree: PropertyTree, config: &LocatorConfig) -> Self {
        Self::with_keys(tree, config.keys.clone())
    }

    /// Start building a container image by image.
    pub fn builder() -> MemorySourceBuilder {
        MemorySourceBuilder::default()
    }

    pub fn tree(&self) -> &PropertyTree {
        &self.tree
    }

    fn image(&self, index: usize) -> Option<&PropertyDict> {
        self.tree
            .get_dict(&self.keys.file_contents)?
            .get_array(&self.keys.images)?
            .get(index)?
            .as_dict()
    }
}

impl ImageSource for MemorySource {
    fn properties(&self) -> Cow<'_, PropertyTree> {
        Cow::Borrowed(&self.tree)
    }

    fn copy_auxiliary_info(&self, index: usize, kind: AuxiliaryDataKind) -> Option<PropertyDict> {
        let entries = self.image(index)?.get_array(&self.keys.auxiliary_data)?;
        let entry = entries
            .iter()
            .filter_map(PropertyValue::as_dict)
            .find(|e| e.get_str(&self.keys.auxiliary_data_type) == Some(kind.type_tag()))?;

        let mut info = entry.clone();
        info.remove(&self.keys.auxiliary_data_type);
        Some(info)
    }
}

/// Builder for [`MemorySource`] trees with the default key spellings.
#[derive(Debug, Default)]
pub struct MemorySourceBuilder {
    images: Vec<PropertyValue>,
    extra: PropertyDict,
}

impl MemorySourceBuilder {
    /// Append an image that has no auxiliary data list at all.
    pub fn image(mut self) -> Self {
        self.images.push(PropertyDict::new().into());
        self
    }

    /// Append an image with an auxiliary data list (which may be empty).
    pub fn image_with<I>(mut self, auxiliary: I) -> Self
    where
        I: IntoIterator<Item = (AuxiliaryDataKind, AuxiliaryRecord)>,
    {
        let keys = PropertyKeys::default();
        let entries: Vec<PropertyValue> = auxiliary
            .into_iter()
            .map(|(kind, record)| {
                let mut entry = record.to_info();
                entry.set(keys.auxiliary_data_type.as_str(), kind.type_tag());
                entry.into()
            })
            .collect();
        self.images
            .push(PropertyDict::new().with(keys.auxiliary_data, entries).into());
        self
    }

    /// Set an additional top-level property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.extra.set(key, value);
        self
    }

    pub fn build(self) -> MemorySource {
        let keys = PropertyKeys::default();
        let mut tree = self.extra;
        tree.set(
            keys.file_contents,
            PropertyDict::new().with(keys.images, self.images),
        );
        MemorySource::new(tree)
    }
}
