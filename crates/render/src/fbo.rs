//! Named off-screen render targets.

use blockworld_common::{RENDER_TARGET_HANDLE_BASE, TextureHandle};
use std::collections::BTreeMap;

/// Sampleable attachments of an [`Fbo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FboAttachment {
    Color,
    Depth,
    Normals,
    LightBuffer,
}

/// Which optional attachments a target is created with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FboSpec {
    pub depth: bool,
    pub normals: bool,
    pub light_buffer: bool,
}

impl FboSpec {
    pub fn color_only() -> Self {
        Self::default()
    }

    /// Colour, depth, normals and light buffer: the opaque scene layout.
    pub fn gbuffer() -> Self {
        Self {
            depth: true,
            normals: true,
            light_buffer: true,
        }
    }
}

/// A framebuffer object and the textures backing its attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fbo {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub color: TextureHandle,
    pub depth: Option<TextureHandle>,
    pub normals: Option<TextureHandle>,
    pub light_buffer: Option<TextureHandle>,
}

impl Fbo {
    pub fn attachment(&self, attachment: FboAttachment) -> Option<TextureHandle> {
        match attachment {
            FboAttachment::Color => Some(self.color),
            FboAttachment::Depth => self.depth,
            FboAttachment::Normals => self.normals,
            FboAttachment::LightBuffer => self.light_buffer,
        }
    }

    pub fn spec(&self) -> FboSpec {
        FboSpec {
            depth: self.depth.is_some(),
            normals: self.normals.is_some(),
            light_buffer: self.light_buffer.is_some(),
        }
    }
}

/// Read access to framebuffers by name.
pub trait FboSource {
    fn fbo(&self, name: &str) -> Option<&Fbo>;
}

/// Owns the renderer's framebuffers and hands out texture names for them.
///
/// By default names start at [`RENDER_TARGET_HANDLE_BASE`], above every
/// name the texture store can allocate.
#[derive(Debug, Clone)]
pub struct FboManager {
    fbos: BTreeMap<String, Fbo>,
    next_handle: u32,
}

impl Default for FboManager {
    fn default() -> Self {
        Self::with_handle_base(RENDER_TARGET_HANDLE_BASE)
    }
}

impl FboManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle_base(base: u32) -> Self {
        Self {
            fbos: BTreeMap::new(),
            next_handle: base,
        }
    }

    /// Create (or recreate) a named framebuffer.
    pub fn create(&mut self, name: &str, width: u32, height: u32, spec: FboSpec) -> &Fbo {
        let fbo = Fbo {
            name: name.to_string(),
            width,
            height,
            color: self.alloc(),
            depth: spec.depth.then(|| self.alloc()),
            normals: spec.normals.then(|| self.alloc()),
            light_buffer: spec.light_buffer.then(|| self.alloc()),
        };
        tracing::debug!(name, width, height, ?spec, "created fbo");
        self.fbos.insert(name.to_string(), fbo);
        &self.fbos[name]
    }

    /// Recreate every framebuffer at a new size with fresh texture names.
    pub fn resize(&mut self, width: u32, height: u32) {
        let specs: Vec<(String, FboSpec)> = self
            .fbos
            .values()
            .map(|f| (f.name.clone(), f.spec()))
            .collect();
        for (name, spec) in specs {
            self.create(&name, width, height, spec);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Fbo> {
        self.fbos.remove(name)
    }

    pub fn len(&self) -> usize {
        self.fbos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fbos.is_empty()
    }

    fn alloc(&mut self) -> TextureHandle {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl FboSource for FboManager {
    fn fbo(&self, name: &str) -> Option<&Fbo> {
        self.fbos.get(name)
    }
}
