use blockworld_common::AssetUri;
use glam::Vec4;

use crate::binder::TextureUnits;
use crate::fbo::FboAttachment;
use crate::frame::FrameContext;
use crate::gl::GraphicsApi;
use crate::params::{ApplyOutcome, ShaderParameters};
use crate::property::Property;

const TERRAIN: &str = "engine:terrain";
const TERRAIN_NORMAL: &str = "engine:terrainNormal";
const TERRAIN_HEIGHT: &str = "engine:terrainHeight";
const WATER: &str = "engine:waterStill";
const LAVA: &str = "engine:lavaStill";
const WATER_NORMAL: &str = "engine:waterNormal";
const WATER_NORMAL_ALT: &str = "engine:waterNormalAlt";
const EFFECTS: &str = "engine:effects";

// Indices into `ChunkParameters::textures`.
const TEX_TERRAIN: usize = 0;
const TEX_TERRAIN_NORMAL: usize = 1;
const TEX_TERRAIN_HEIGHT: usize = 2;
const TEX_WATER: usize = 3;
const TEX_LAVA: usize = 4;
const TEX_WATER_NORMAL: usize = 5;
const TEX_WATER_NORMAL_ALT: usize = 6;
const TEX_EFFECTS: usize = 7;

const TEXTURES: [&str; 8] = [
    TERRAIN,
    TERRAIN_NORMAL,
    TERRAIN_HEIGHT,
    WATER,
    LAVA,
    WATER_NORMAL,
    WATER_NORMAL_ALT,
    EFFECTS,
];

/// Textures that must all be present for the pass to run.
const REQUIRED: [usize; 6] = [
    TEX_TERRAIN,
    TEX_WATER,
    TEX_LAVA,
    TEX_WATER_NORMAL,
    TEX_WATER_NORMAL_ALT,
    TEX_EFFECTS,
];

// Indices into `ChunkParameters::props`, in editor order.
const WAVE_INTENS: usize = 0;
const WAVE_INTENS_FALLOFF: usize = 1;
const WAVE_SIZE: usize = 2;
const WAVE_SIZE_FALLOFF: usize = 3;
const WAVE_SPEED: usize = 4;
const WAVE_SPEED_FALLOFF: usize = 5;
const WATER_SPEC_EXP: usize = 6;
const WATER_NORMAL_BIAS: usize = 7;
const WATER_FRESNEL_BIAS: usize = 8;
const WATER_FRESNEL_POW: usize = 9;
const WATER_REFRACTION: usize = 10;
const WATER_OFFSET_Y: usize = 11;
const WAVE_OVERALL_SCALE: usize = 12;
const WATER_TINT: usize = 13;
const PARALLAX_BIAS: usize = 14;
const PARALLAX_SCALE: usize = 15;

const PROPERTY_COUNT: usize = 16;

/// Parameters for the terrain and water (`chunk`) program.
#[derive(Debug, Clone)]
pub struct ChunkParameters {
    props: [Property; PROPERTY_COUNT],
    /// Parsed once so per-frame lookups do not allocate.
    textures: [AssetUri; 8],
}

impl Default for ChunkParameters {
    fn default() -> Self {
        Self {
            props: [
                Property::bounded("waveIntens", 1.5, 0.0, 2.0),
                Property::bounded("waveIntensFalloff", 0.85, 0.0, 2.0),
                Property::bounded("waveSize", 0.1, 0.0, 2.0),
                Property::bounded("waveSizeFalloff", 1.25, 0.0, 2.0),
                Property::bounded("waveSpeed", 0.1, 0.0, 2.0),
                Property::bounded("waveSpeedFalloff", 0.95, 0.0, 2.0),
                Property::bounded("waterSpecExp", 512.0, 0.0, 1024.0),
                Property::bounded("waterNormalBias", 25.0, 1.0, 100.0),
                Property::bounded("waterFresnelBias", 0.01, 0.01, 0.1),
                Property::bounded("waterFresnelPow", 2.5, 0.0, 10.0),
                Property::bounded("waterRefraction", 0.04, 0.0, 1.0),
                Property::bounded("waterOffsetY", 0.0, 0.0, 5.0),
                Property::bounded("waveOverallScale", 1.0, 0.0, 2.0),
                Property::bounded("waterTint", 0.24, 0.0, 1.0),
                Property::bounded("parallaxBias", 0.05, 0.0, 0.5),
                Property::bounded("parallaxScale", 0.05, 0.0, 0.5),
            ],
            textures: TEXTURES.map(|uri| {
                AssetUri::engine(uri.strip_prefix("engine:").unwrap_or(uri))
            }),
        }
    }
}

impl ChunkParameters {
    pub const PROGRAM: &'static str = "chunk";

    pub fn new() -> Self {
        Self::default()
    }

    fn value(&self, index: usize) -> f32 {
        self.props[index].value()
    }
}

impl ShaderParameters for ChunkParameters {
    fn program_name(&self) -> &'static str {
        Self::PROGRAM
    }

    fn apply(&self, frame: &FrameContext<'_>, gl: &mut dyn GraphicsApi) -> ApplyOutcome {
        let _span = tracing::debug_span!("chunk_parameters").entered();
        let textures = frame.textures;
        let rendering = frame.rendering;

        let mut required = [None; 6];
        for (slot, index) in required.iter_mut().zip(REQUIRED) {
            match textures.texture(&self.textures[index]) {
                Some(handle) => *slot = Some(handle),
                None => {
                    let uri = TEXTURES[index];
                    tracing::debug!(uri, "texture missing, skipping chunk parameters");
                    return ApplyOutcome::Skipped { missing: uri };
                }
            }
        }
        let [terrain, water, lava, water_normal, water_normal_alt, effects] = required;

        let mut units = TextureUnits::new();
        units.bind(gl, "textureAtlas", terrain);
        units.bind(gl, "textureWater", water);
        units.bind(gl, "textureLava", lava);
        units.bind(gl, "textureWaterNormal", water_normal);
        units.bind(gl, "textureWaterNormalAlt", water_normal_alt);
        units.bind(gl, "textureEffects", effects);
        units.bind_fbo(
            gl,
            frame.fbos,
            "textureWaterReflection",
            "sceneReflected",
            FboAttachment::Color,
        );
        units.bind_fbo(
            gl,
            frame.fbos,
            "texSceneOpaque",
            "sceneOpaque",
            FboAttachment::Color,
        );

        if rendering.is_normal_mapping() {
            match textures.texture(&self.textures[TEX_TERRAIN_NORMAL]) {
                Some(normal) => {
                    units.bind(gl, "textureAtlasNormal", Some(normal));
                }
                None => tracing::warn!(uri = TERRAIN_NORMAL, "normal mapping on but texture missing"),
            }

            if rendering.is_parallax_mapping() {
                match textures.texture(&self.textures[TEX_TERRAIN_HEIGHT]) {
                    Some(height) => {
                        units.bind(gl, "textureAtlasHeight", Some(height));
                    }
                    None => {
                        tracing::warn!(uri = TERRAIN_HEIGHT, "parallax mapping on but texture missing")
                    }
                }
            }
        }

        gl.set_float4(
            "lightingSettingsFrag",
            Vec4::new(0.0, 0.0, self.value(WATER_SPEC_EXP), 0.0),
        );
        gl.set_float4(
            "waterSettingsFrag",
            Vec4::new(
                self.value(WATER_NORMAL_BIAS),
                self.value(WATER_REFRACTION),
                self.value(WATER_FRESNEL_BIAS),
                self.value(WATER_FRESNEL_POW),
            ),
        );
        gl.set_float4(
            "alternativeWaterSettingsFrag",
            Vec4::new(self.value(WATER_TINT), 0.0, 0.0, 0.0),
        );

        if rendering.is_animate_water() {
            for index in [
                WAVE_INTENS_FALLOFF,
                WAVE_SIZE_FALLOFF,
                WAVE_SIZE,
                WAVE_SPEED_FALLOFF,
                WAVE_SPEED,
                WAVE_INTENS,
                WATER_OFFSET_Y,
                WAVE_OVERALL_SCALE,
            ] {
                let property = &self.props[index];
                gl.set_float(property.name(), property.value());
            }
        }

        if rendering.is_parallax_mapping_effective() {
            gl.set_float4(
                "parallaxProperties",
                Vec4::new(
                    self.value(PARALLAX_BIAS),
                    self.value(PARALLAX_SCALE),
                    0.0,
                    0.0,
                ),
            );
        }

        ApplyOutcome::Applied {
            texture_units: units.used(),
        }
    }

    fn properties(&self) -> &[Property] {
        &self.props
    }

    fn properties_mut(&mut self) -> &mut [Property] {
        &mut self.props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fbo::{FboManager, FboSource, FboSpec};
    use crate::recorder::{GlCall, RecordingGraphics};
    use blockworld_assets::TextureStore;
    use blockworld_config::RenderingConfig;

    fn full_store() -> TextureStore {
        let mut store = TextureStore::new();
        for (i, uri) in TEXTURES.into_iter().enumerate() {
            store.register_solid(uri, [i as u8, 0, 0, 255]).unwrap();
        }
        store
    }

    fn scene_fbos() -> FboManager {
        let mut fbos = FboManager::new();
        fbos.create("sceneReflected", 256, 256, FboSpec::color_only());
        fbos.create("sceneOpaque", 256, 256, FboSpec::gbuffer());
        fbos
    }

    fn run(rendering: &RenderingConfig, store: &TextureStore) -> (ApplyOutcome, RecordingGraphics) {
        let fbos = scene_fbos();
        let frame = FrameContext::new(rendering, store, &fbos);
        let mut gl = RecordingGraphics::new();
        let outcome = ChunkParameters::new().apply(&frame, &mut gl);
        (outcome, gl)
    }

    #[test]
    fn base_bindings_in_order() {
        let store = full_store();
        let (outcome, gl) = run(&RenderingConfig::default(), &store);
        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 8 });

        let samplers = [
            "textureAtlas",
            "textureWater",
            "textureLava",
            "textureWaterNormal",
            "textureWaterNormalAlt",
            "textureEffects",
            "textureWaterReflection",
            "texSceneOpaque",
        ];
        for (unit, sampler) in samplers.iter().enumerate() {
            assert_eq!(gl.sampler(sampler), Some(unit as i32), "{sampler}");
        }
        assert_eq!(gl.sampled_texture("textureAtlas"), store.lookup(TERRAIN));
        assert_eq!(gl.sampled_texture("textureLava"), store.lookup(LAVA));
        assert!(gl.sampler("textureAtlasNormal").is_none());
        assert!(gl.uniform("parallaxProperties").is_none());
        assert!(gl.uniform("waveSpeed").is_none());
    }

    #[test]
    fn fbo_textures_come_from_registry() {
        let store = full_store();
        let fbos = scene_fbos();
        let rendering = RenderingConfig::default();
        let frame = FrameContext::new(&rendering, &store, &fbos);
        let mut gl = RecordingGraphics::new();
        ChunkParameters::new().apply(&frame, &mut gl);

        assert_eq!(
            gl.sampled_texture("textureWaterReflection"),
            Some(fbos.fbo("sceneReflected").unwrap().color)
        );
        assert_eq!(
            gl.sampled_texture("texSceneOpaque"),
            Some(fbos.fbo("sceneOpaque").unwrap().color)
        );
    }

    #[test]
    fn water_settings_vectors() {
        let store = full_store();
        let (_, gl) = run(&RenderingConfig::default(), &store);
        assert_eq!(
            gl.float4("lightingSettingsFrag"),
            Some([0.0, 0.0, 512.0, 0.0])
        );
        assert_eq!(
            gl.float4("waterSettingsFrag"),
            Some([25.0, 0.04, 0.01, 2.5])
        );
        assert_eq!(
            gl.float4("alternativeWaterSettingsFrag"),
            Some([0.24, 0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn missing_required_texture_skips_everything() {
        let mut store = full_store();
        store.remove(&LAVA.parse().unwrap()).unwrap();
        let (outcome, gl) = run(&RenderingConfig::default(), &store);
        assert_eq!(outcome, ApplyOutcome::Skipped { missing: LAVA });
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn missing_alt_water_normal_skips() {
        let mut store = full_store();
        store.remove(&WATER_NORMAL_ALT.parse().unwrap()).unwrap();
        let (outcome, gl) = run(&RenderingConfig::default(), &store);
        assert!(!outcome.is_applied());
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn normal_mapping_adds_atlas_normal() {
        let store = full_store();
        let mut rendering = RenderingConfig::default();
        rendering.set_normal_mapping(true);
        let (outcome, gl) = run(&rendering, &store);

        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 9 });
        assert_eq!(gl.sampler("textureAtlasNormal"), Some(8));
        assert_eq!(
            gl.sampled_texture("textureAtlasNormal"),
            store.lookup(TERRAIN_NORMAL)
        );
        assert!(gl.sampler("textureAtlasHeight").is_none());
        assert!(gl.uniform("parallaxProperties").is_none());
    }

    #[test]
    fn parallax_adds_height_and_properties() {
        let store = full_store();
        let mut rendering = RenderingConfig::default();
        rendering.set_normal_mapping(true);
        rendering.set_parallax_mapping(true);
        let (outcome, gl) = run(&rendering, &store);

        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 10 });
        assert_eq!(gl.sampler("textureAtlasHeight"), Some(9));
        assert_eq!(
            gl.float4("parallaxProperties"),
            Some([0.05, 0.05, 0.0, 0.0])
        );
    }

    #[test]
    fn parallax_without_normal_mapping_is_ignored() {
        let store = full_store();
        let mut rendering = RenderingConfig::default();
        rendering.set_parallax_mapping(true);
        let (outcome, gl) = run(&rendering, &store);

        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 8 });
        assert!(gl.sampler("textureAtlasHeight").is_none());
        assert!(gl.uniform("parallaxProperties").is_none());
    }

    #[test]
    fn missing_normal_map_consumes_no_unit() {
        let mut store = full_store();
        store.remove(&TERRAIN_NORMAL.parse().unwrap()).unwrap();
        let mut rendering = RenderingConfig::default();
        rendering.set_normal_mapping(true);
        rendering.set_parallax_mapping(true);
        let (outcome, gl) = run(&rendering, &store);

        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 9 });
        assert!(gl.sampler("textureAtlasNormal").is_none());
        assert_eq!(gl.sampler("textureAtlasHeight"), Some(8));
    }

    #[test]
    fn missing_height_map_consumes_no_unit() {
        let mut store = full_store();
        store.remove(&TERRAIN_HEIGHT.parse().unwrap()).unwrap();
        let mut rendering = RenderingConfig::default();
        rendering.set_normal_mapping(true);
        rendering.set_parallax_mapping(true);
        let (outcome, gl) = run(&rendering, &store);

        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 9 });
        assert_eq!(gl.sampler("textureAtlasNormal"), Some(8));
        assert!(gl.sampler("textureAtlasHeight").is_none());
        assert!(gl.bound_texture(9).is_none());
        // The uniforms still follow the flags.
        assert_eq!(
            gl.float4("parallaxProperties"),
            Some([0.05, 0.05, 0.0, 0.0])
        );
    }

    #[test]
    fn texture_uris_match_labels() {
        let params = ChunkParameters::new();
        for (uri, label) in params.textures.iter().zip(TEXTURES) {
            assert_eq!(Some(uri.clone()), label.parse().ok());
        }
    }

    #[test]
    fn animated_water_uniform_order() {
        let store = full_store();
        let mut rendering = RenderingConfig::default();
        rendering.set_animate_water(true);
        let (_, gl) = run(&rendering, &store);

        let floats: Vec<&str> = gl
            .calls()
            .iter()
            .filter_map(|c| match c {
                GlCall::SetFloat { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            floats,
            vec![
                "waveIntensFalloff",
                "waveSizeFalloff",
                "waveSize",
                "waveSpeedFalloff",
                "waveSpeed",
                "waveIntens",
                "waterOffsetY",
                "waveOverallScale",
            ]
        );
        assert_eq!(gl.float("waveIntens"), Some(1.5));
    }

    #[test]
    fn tuned_values_are_pushed() {
        let store = full_store();
        let fbos = scene_fbos();
        let mut rendering = RenderingConfig::default();
        rendering.set_animate_water(true);
        let frame = FrameContext::new(&rendering, &store, &fbos);

        let mut params = ChunkParameters::new();
        params.set_property("waveSpeed", 0.7).unwrap();
        params.set_property("waterTint", 0.5).unwrap();
        let mut gl = RecordingGraphics::new();
        params.apply(&frame, &mut gl);

        assert_eq!(gl.float("waveSpeed"), Some(0.7));
        assert_eq!(
            gl.float4("alternativeWaterSettingsFrag"),
            Some([0.5, 0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn editor_order() {
        let params = ChunkParameters::new();
        let names: Vec<&str> = params.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names.first(), Some(&"waveIntens"));
        assert_eq!(names[WATER_SPEC_EXP], "waterSpecExp");
        assert_eq!(names.last(), Some(&"parallaxScale"));
        assert_eq!(names.len(), PROPERTY_COUNT);
    }

    #[test]
    fn missing_reflection_fbo_still_binds_sampler() {
        let store = full_store();
        let rendering = RenderingConfig::default();
        let fbos = FboManager::new();
        let frame = FrameContext::new(&rendering, &store, &fbos);
        let mut gl = RecordingGraphics::new();
        let outcome = ChunkParameters::new().apply(&frame, &mut gl);

        assert_eq!(outcome, ApplyOutcome::Applied { texture_units: 8 });
        assert_eq!(gl.sampler("textureWaterReflection"), Some(6));
        assert_eq!(gl.bound_texture(6), None);
    }
}
