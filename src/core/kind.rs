//! Auxiliary data kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of an auxiliary data block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuxiliaryDataKind {
    Disparity,
    Depth,
    PortraitEffectsMatte,
    SemanticSegmentationHairMatte,
}

impl AuxiliaryDataKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Disparity,
        Self::Depth,
        Self::PortraitEffectsMatte,
        Self::SemanticSegmentationHairMatte,
    ];

    /// Type tag as written in the container's auxiliary descriptors.
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::Disparity => "kCGImageAuxiliaryDataTypeDisparity",
            Self::Depth => "kCGImageAuxiliaryDataTypeDepth",
            Self::PortraitEffectsMatte => "kCGImageAuxiliaryDataTypePortraitEffectsMatte",
            Self::SemanticSegmentationHairMatte => {
                "kCGImageAuxiliaryDataTypeSemanticSegmentationHairMatte"
            }
        }
    }

    /// Parse a type tag. Unknown tags yield `None`.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_tag() == tag)
    }

    /// Depth or disparity, as opposed to a matte.
    pub const fn is_depth_like(self) -> bool {
        matches!(self, Self::Disparity | Self::Depth)
    }
}

impl fmt::Display for AuxiliaryDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disparity => "disparity",
            Self::Depth => "depth",
            Self::PortraitEffectsMatte => "portrait effects matte",
            Self::SemanticSegmentationHairMatte => "hair segmentation matte",
        };
        f.write_str(name)
    }
}

/// Matte kinds accepted by the matte lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatteKind {
    PortraitEffects,
    SemanticSegmentationHair,
}

impl From<MatteKind> for AuxiliaryDataKind {
    fn from(kind: MatteKind) -> Self {
        match kind {
            MatteKind::PortraitEffects => Self::PortraitEffectsMatte,
            MatteKind::SemanticSegmentationHair => Self::SemanticSegmentationHairMatte,
        }
    }
}

impl TryFrom<AuxiliaryDataKind> for MatteKind {
    type Error = AuxiliaryDataKind;

    fn try_from(kind: AuxiliaryDataKind) -> Result<Self, Self::Error> {
        match kind {
            AuxiliaryDataKind::PortraitEffectsMatte => Ok(Self::PortraitEffects),
            AuxiliaryDataKind::SemanticSegmentationHairMatte => Ok(Self::SemanticSegmentationHair),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_roundtrip() {
        for kind in AuxiliaryDataKind::ALL {
            assert_eq!(AuxiliaryDataKind::from_type_tag(kind.type_tag()), Some(kind));
        }
        assert_eq!(AuxiliaryDataKind::from_type_tag("kCGImageAuxiliaryDataTypeISOGainMap"), None);
    }

    #[test]
    fn test_matte_kind_conversion() {
        let kind: AuxiliaryDataKind = MatteKind::SemanticSegmentationHair.into();
        assert_eq!(kind, AuxiliaryDataKind::SemanticSegmentationHairMatte);
        assert_eq!(MatteKind::try_from(AuxiliaryDataKind::Depth), Err(AuxiliaryDataKind::Depth));
        assert!(!kind.is_depth_like());
        assert!(AuxiliaryDataKind::Disparity.is_depth_like());
    }
}
