//! Shader parameter binding.
//!
//! Each shader program has a parameter object that owns its tunable
//! properties and, once per draw call, pushes uniforms and binds textures to
//! sequential texture units. What gets bound depends on the rendering
//! feature flags in [`blockworld_config::RenderingConfig`].
//!
//! # Invariants
//! - Binders never mutate configuration or registries; they only read the
//!   [`FrameContext`] and write to the [`GraphicsApi`].
//! - Texture units are assigned from 0 upward with no gaps within one apply.
//!
//! The graphics API is a trait. [`RecordingGraphics`] implements it by
//! logging every call, which is what the CLI and tests use.

mod binder;
mod camera;
mod fbo;
mod frame;
mod gl;
pub mod params;
mod property;
mod recorder;

pub use binder::{MAX_TEXTURE_UNITS, TextureUnits};
pub use camera::{CameraView, PerspectiveCamera};
pub use fbo::{Fbo, FboAttachment, FboManager, FboSource, FboSpec};
pub use frame::{FogSampler, FrameContext, NoFog, TextureSource};
pub use gl::GraphicsApi;
pub use params::{
    ApplyOutcome, ChunkParameters, CombineParameters, ParamError, ShaderParameters,
};
pub use property::Property;
pub use recorder::{GlCall, RecordingGraphics};

pub fn crate_info() -> &'static str {
    "blockworld-render v0.1.0"
}
