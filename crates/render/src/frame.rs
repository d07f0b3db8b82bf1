use blockworld_assets::TextureStore;
use blockworld_common::{AssetUri, TextureHandle};
use blockworld_config::RenderingConfig;

use crate::camera::CameraView;
use crate::fbo::FboSource;

/// Texture lookup by asset URI.
pub trait TextureSource {
    fn texture(&self, uri: &AssetUri) -> Option<TextureHandle>;
}

impl TextureSource for TextureStore {
    fn texture(&self, uri: &AssetUri) -> Option<TextureHandle> {
        TextureStore::texture(self, uri)
    }
}

/// World fog density at a horizontal position.
pub trait FogSampler {
    fn fog(&self, x: f32, z: f32) -> f32;
}

impl<F: Fn(f32, f32) -> f32> FogSampler for F {
    fn fog(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// A world without fog.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFog;

impl FogSampler for NoFog {
    fn fog(&self, _x: f32, _z: f32) -> f32 {
        0.0
    }
}

/// Everything a parameter binder reads for one draw call.
pub struct FrameContext<'a> {
    pub rendering: &'a RenderingConfig,
    pub textures: &'a dyn TextureSource,
    pub fbos: &'a dyn FboSource,
    /// `None` when no camera is active (e.g. before the world is loaded).
    pub camera: Option<CameraView>,
    pub fog: &'a dyn FogSampler,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        rendering: &'a RenderingConfig,
        textures: &'a dyn TextureSource,
        fbos: &'a dyn FboSource,
    ) -> Self {
        Self {
            rendering,
            textures,
            fbos,
            camera: None,
            fog: &NoFog,
        }
    }

    pub fn with_camera(mut self, camera: CameraView) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_fog(mut self, fog: &'a dyn FogSampler) -> Self {
        self.fog = fog;
        self
    }
}
