use serde::{Deserialize, Serialize};
use std::fmt;

/// Intermediate render targets that the debug view can display full-screen.
///
/// Order matters: cycling walks the variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugRenderingStage {
    #[default]
    OpaqueColor,
    TransparentColor,
    OpaqueNormals,
    OpaqueDepth,
    OpaqueSunlight,
    BakedOcclusion,
    Ssao,
    OpaqueLightBuffer,
    ShadowMap,
    Sobel,
    HighPass,
    Bloom,
    SkyBand,
    LightShafts,
    ReconstructedPosition,
}

impl DebugRenderingStage {
    pub const ALL: [DebugRenderingStage; 15] = [
        Self::OpaqueColor,
        Self::TransparentColor,
        Self::OpaqueNormals,
        Self::OpaqueDepth,
        Self::OpaqueSunlight,
        Self::BakedOcclusion,
        Self::Ssao,
        Self::OpaqueLightBuffer,
        Self::ShadowMap,
        Self::Sobel,
        Self::HighPass,
        Self::Bloom,
        Self::SkyBand,
        Self::LightShafts,
        Self::ReconstructedPosition,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Ordinal of this stage, as uploaded to the debug shader.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following stage, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::OpaqueColor => "opaque_color",
            Self::TransparentColor => "transparent_color",
            Self::OpaqueNormals => "opaque_normals",
            Self::OpaqueDepth => "opaque_depth",
            Self::OpaqueSunlight => "opaque_sunlight",
            Self::BakedOcclusion => "baked_occlusion",
            Self::Ssao => "ssao",
            Self::OpaqueLightBuffer => "opaque_light_buffer",
            Self::ShadowMap => "shadow_map",
            Self::Sobel => "sobel",
            Self::HighPass => "high_pass",
            Self::Bloom => "bloom",
            Self::SkyBand => "sky_band",
            Self::LightShafts => "light_shafts",
            Self::ReconstructedPosition => "reconstructed_position",
        }
    }
}

impl fmt::Display for DebugRenderingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, stage) in DebugRenderingStage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
            assert_eq!(DebugRenderingStage::from_index(i), Some(*stage));
        }
        assert_eq!(DebugRenderingStage::COUNT, 15);
    }

    #[test]
    fn from_index_out_of_range() {
        assert_eq!(DebugRenderingStage::from_index(15), None);
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(
            DebugRenderingStage::OpaqueColor.next(),
            DebugRenderingStage::TransparentColor
        );
        assert_eq!(
            DebugRenderingStage::ReconstructedPosition.next(),
            DebugRenderingStage::OpaqueColor
        );
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&DebugRenderingStage::OpaqueLightBuffer).unwrap();
        assert_eq!(json, "\"opaque_light_buffer\"");
        let back: DebugRenderingStage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DebugRenderingStage::OpaqueLightBuffer);
        assert_eq!(back.to_string(), back.name());
    }
}
