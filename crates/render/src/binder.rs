use blockworld_common::TextureHandle;

use crate::fbo::{FboAttachment, FboSource};
use crate::gl::GraphicsApi;

/// Texture units every GL 3.x fragment stage is guaranteed to have.
pub const MAX_TEXTURE_UNITS: u32 = 16;

/// Hands out texture units sequentially within one parameter apply.
#[derive(Debug, Default)]
pub struct TextureUnits {
    next: u32,
}

impl TextureUnits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units handed out so far.
    pub fn used(&self) -> u32 {
        self.next
    }

    /// Take the next unit, bind `texture` to it (if any) and point the
    /// sampler uniform at it.
    pub fn bind(
        &mut self,
        gl: &mut dyn GraphicsApi,
        sampler: &str,
        texture: Option<TextureHandle>,
    ) -> u32 {
        let unit = self.next;
        if unit >= MAX_TEXTURE_UNITS {
            tracing::warn!(sampler, unit, "texture unit beyond guaranteed limit");
        }
        gl.active_texture(unit);
        if let Some(texture) = texture {
            gl.bind_texture_2d(texture);
        }
        gl.set_int(sampler, unit as i32);
        self.next += 1;
        unit
    }

    /// Bind an attachment of a named framebuffer.
    ///
    /// A missing framebuffer or attachment still consumes the unit and sets
    /// the sampler; only the texture bind is skipped.
    pub fn bind_fbo(
        &mut self,
        gl: &mut dyn GraphicsApi,
        fbos: &dyn FboSource,
        sampler: &str,
        fbo: &str,
        attachment: FboAttachment,
    ) -> u32 {
        let texture = fbos.fbo(fbo).and_then(|f| f.attachment(attachment));
        if texture.is_none() {
            tracing::trace!(fbo, ?attachment, "fbo attachment not available");
        }
        self.bind(gl, sampler, texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fbo::{FboManager, FboSpec};
    use crate::recorder::RecordingGraphics;

    #[test]
    fn units_are_sequential() {
        let mut gl = RecordingGraphics::new();
        let mut units = TextureUnits::new();
        assert_eq!(units.bind(&mut gl, "a", Some(TextureHandle(3))), 0);
        assert_eq!(units.bind(&mut gl, "b", Some(TextureHandle(4))), 1);
        assert_eq!(units.used(), 2);
        assert_eq!(gl.sampled_texture("a"), Some(TextureHandle(3)));
        assert_eq!(gl.sampled_texture("b"), Some(TextureHandle(4)));
    }

    #[test]
    fn missing_fbo_still_consumes_unit() {
        let mut gl = RecordingGraphics::new();
        let fbos = FboManager::new();
        let mut units = TextureUnits::new();
        let unit = units.bind_fbo(&mut gl, &fbos, "texEdges", "sobel", FboAttachment::Color);
        assert_eq!(unit, 0);
        assert_eq!(units.used(), 1);
        assert_eq!(gl.sampler("texEdges"), Some(0));
        assert_eq!(gl.bound_texture(0), None);
    }

    #[test]
    fn binds_requested_attachment() {
        let mut gl = RecordingGraphics::new();
        let mut fbos = FboManager::new();
        let depth = fbos
            .create("sceneOpaque", 64, 64, FboSpec::gbuffer())
            .depth;
        let mut units = TextureUnits::new();
        units.bind_fbo(&mut gl, &fbos, "texDepth", "sceneOpaque", FboAttachment::Depth);
        assert_eq!(gl.sampled_texture("texDepth"), depth);
    }
}
