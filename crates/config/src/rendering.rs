use serde::{Deserialize, Serialize};

/// Rendering feature toggles consulted by the shader parameter binders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    normal_mapping: bool,
    parallax_mapping: bool,
    animate_water: bool,
    volumetric_fog: bool,
    ssao: bool,
    outline: bool,
}

impl RenderingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_normal_mapping(&self) -> bool {
        self.normal_mapping
    }

    pub fn set_normal_mapping(&mut self, enabled: bool) {
        self.normal_mapping = enabled;
    }

    /// Raw parallax flag. See [`Self::is_parallax_mapping_effective`].
    pub fn is_parallax_mapping(&self) -> bool {
        self.parallax_mapping
    }

    pub fn set_parallax_mapping(&mut self, enabled: bool) {
        self.parallax_mapping = enabled;
    }

    /// Parallax needs the normal map; without it the flag has no effect.
    pub fn is_parallax_mapping_effective(&self) -> bool {
        self.parallax_mapping && self.normal_mapping
    }

    pub fn is_animate_water(&self) -> bool {
        self.animate_water
    }

    pub fn set_animate_water(&mut self, enabled: bool) {
        self.animate_water = enabled;
    }

    pub fn is_volumetric_fog(&self) -> bool {
        self.volumetric_fog
    }

    pub fn set_volumetric_fog(&mut self, enabled: bool) {
        self.volumetric_fog = enabled;
    }

    pub fn is_ssao(&self) -> bool {
        self.ssao
    }

    pub fn set_ssao(&mut self, enabled: bool) {
        self.ssao = enabled;
    }

    pub fn is_outline(&self) -> bool {
        self.outline
    }

    pub fn set_outline(&mut self, enabled: bool) {
        self.outline = enabled;
    }
}
