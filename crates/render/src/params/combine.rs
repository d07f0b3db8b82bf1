use glam::{Vec3, Vec4};

use crate::binder::TextureUnits;
use crate::fbo::FboAttachment;
use crate::frame::FrameContext;
use crate::gl::GraphicsApi;
use crate::params::{ApplyOutcome, ShaderParameters};
use crate::property::Property;

/// World height of the volumetric fog plane.
const FOG_PLANE_HEIGHT: f32 = 32.0;

const SKY_INSCATTERING_LENGTH: usize = 0;
const SKY_INSCATTERING_STRENGTH: usize = 1;
const SKY_INSCATTERING_THRESHOLD: usize = 2;
const OUTLINE_THICKNESS: usize = 3;
const OUTLINE_DEPTH_THRESHOLD: usize = 4;
const VOL_FOG_DENSITY_AT_VIEWER: usize = 5;
const VOL_FOG_GLOBAL_DENSITY: usize = 6;
const VOL_FOG_HEIGHT_FALLOFF: usize = 7;
const WORLD_FOG_LIMIT: usize = 8;

const PROPERTY_COUNT: usize = 9;

/// Parameters for the post-process composition (`combine`) program.
#[derive(Debug, Clone)]
pub struct CombineParameters {
    props: [Property; PROPERTY_COUNT],
}

impl Default for CombineParameters {
    fn default() -> Self {
        Self {
            props: [
                Property::bounded("skyInscatteringLength", 0.25, 0.0, 1.0),
                Property::bounded("skyInscatteringStrength", 0.35, 0.0, 1.0),
                Property::bounded("skyInscatteringThreshold", 0.75, 0.0, 1.0),
                Property::unbounded("outlineThickness", 0.65),
                Property::bounded("outlineDepthThreshold", 0.001, 0.001, 0.005),
                Property::bounded("volFogDensityAtViewer", 0.15, 0.001, 1.0),
                Property::bounded("volFogGlobalDensity", 0.15, 0.01, 1.0),
                Property::bounded("volFogHeightFalloff", 0.05, 0.01, 1.0),
                // Cap on the fog density sampled from the world.
                Property::bounded("worldFogLimit", 0.5, 0.0, 1.0),
            ],
        }
    }
}

impl CombineParameters {
    pub const PROGRAM: &'static str = "combine";

    pub fn new() -> Self {
        Self::default()
    }

    fn value(&self, index: usize) -> f32 {
        self.props[index].value()
    }
}

impl ShaderParameters for CombineParameters {
    fn program_name(&self) -> &'static str {
        Self::PROGRAM
    }

    fn apply(&self, frame: &FrameContext<'_>, gl: &mut dyn GraphicsApi) -> ApplyOutcome {
        let _span = tracing::debug_span!("combine_parameters").entered();
        let rendering = frame.rendering;
        let fbos = frame.fbos;
        let mut units = TextureUnits::new();

        if let Some(scene) = fbos.fbo("sceneOpaque") {
            for (sampler, attachment) in [
                ("texSceneOpaque", FboAttachment::Color),
                ("texSceneOpaqueDepth", FboAttachment::Depth),
                ("texSceneOpaqueNormals", FboAttachment::Normals),
                ("texSceneOpaqueLightBuffer", FboAttachment::LightBuffer),
            ] {
                units.bind(gl, sampler, scene.attachment(attachment));
            }
        }

        if rendering.is_volumetric_fog() {
            match frame.camera {
                Some(camera) => {
                    gl.set_matrix4("invViewProjMatrix", &camera.inverse_view_projection);

                    let p = camera.position;
                    // z carries camera height minus camera depth, the layout the
                    // combine shader reads.
                    let fog_position = Vec3::new(p.x, FOG_PLANE_HEIGHT, p.y) - p;
                    gl.set_float3("fogWorldPosition", fog_position);

                    let world_fog = frame.fog.fog(p.x, p.z).min(self.value(WORLD_FOG_LIMIT));
                    gl.set_float4(
                        "volumetricFogSettings",
                        Vec4::new(
                            self.value(VOL_FOG_DENSITY_AT_VIEWER),
                            self.value(VOL_FOG_GLOBAL_DENSITY),
                            self.value(VOL_FOG_HEIGHT_FALLOFF),
                            world_fog,
                        ),
                    );
                }
                None => tracing::trace!("volumetric fog on but no active camera"),
            }
        }

        if let Some(transparent) = fbos.fbo("sceneTransparent") {
            units.bind(gl, "texSceneTransparent", Some(transparent.color));
        }

        if rendering.is_ssao() {
            units.bind_fbo(gl, fbos, "texSsao", "ssaoBlurred", FboAttachment::Color);
        }

        if rendering.is_outline() {
            units.bind_fbo(gl, fbos, "texEdges", "sobel", FboAttachment::Color);
            gl.set_float(
                "outlineDepthThreshold",
                self.value(OUTLINE_DEPTH_THRESHOLD),
            );
            gl.set_float("outlineThickness", self.value(OUTLINE_THICKNESS));
        }

        units.bind_fbo(
            gl,
            fbos,
            "texSceneSkyBand",
            "sceneSkyBand1",
            FboAttachment::Color,
        );

        gl.set_float4(
            "skyInscatteringSettingsFrag",
            Vec4::new(
                0.0,
                self.value(SKY_INSCATTERING_STRENGTH),
                self.value(SKY_INSCATTERING_LENGTH),
                self.value(SKY_INSCATTERING_THRESHOLD),
            ),
        );

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
