use blockworld_common::TextureHandle;
use glam::{Mat4, Vec3, Vec4};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::gl::GraphicsApi;

/// One recorded graphics API call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum GlCall {
    ActiveTexture { unit: u32 },
    BindTexture2d { texture: TextureHandle },
    SetInt { name: String, value: i32 },
    SetFloat { name: String, value: f32 },
    SetFloat3 { name: String, value: [f32; 3] },
    SetFloat4 { name: String, value: [f32; 4] },
    SetMatrix4 { name: String, value: [f32; 16] },
}

impl GlCall {
    /// Uniform name for setter calls, `None` for texture state calls.
    pub fn uniform_name(&self) -> Option<&str> {
        match self {
            Self::SetInt { name, .. }
            | Self::SetFloat { name, .. }
            | Self::SetFloat3 { name, .. }
            | Self::SetFloat4 { name, .. }
            | Self::SetMatrix4 { name, .. } => Some(name),
            Self::ActiveTexture { .. } | Self::BindTexture2d { .. } => None,
        }
    }
}

impl fmt::Display for GlCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveTexture { unit } => write!(f, "active_texture({unit})"),
            Self::BindTexture2d { texture } => write!(f, "bind_texture_2d({texture})"),
            Self::SetInt { name, value } => write!(f, "{name} = {value}"),
            Self::SetFloat { name, value } => write!(f, "{name} = {value:.4}"),
            Self::SetFloat3 { name, value: v } => {
                write!(f, "{name} = ({:.4}, {:.4}, {:.4})", v[0], v[1], v[2])
            }
            Self::SetFloat4 { name, value: v } => {
                write!(
                    f,
                    "{name} = ({:.4}, {:.4}, {:.4}, {:.4})",
                    v[0], v[1], v[2], v[3]
                )
            }
            Self::SetMatrix4 { name, .. } => write!(f, "{name} = mat4"),
        }
    }
}

/// Graphics backend that records calls instead of issuing them.
///
/// Tracks texture unit state the way a driver would, so tests can ask which
/// texture ended up on which unit.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    calls: Vec<GlCall>,
    active_unit: u32,
    units: BTreeMap<u32, TextureHandle>,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Drop recorded calls and texture state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The last call that set the named uniform.
    pub fn uniform(&self, name: &str) -> Option<&GlCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| c.uniform_name() == Some(name))
    }

    /// Sampler unit assigned to the named uniform, if it was set with `set_int`.
    pub fn sampler(&self, name: &str) -> Option<i32> {
        match self.uniform(name) {
            Some(GlCall::SetInt { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.uniform(name) {
            Some(GlCall::SetFloat { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub fn float4(&self, name: &str) -> Option<[f32; 4]> {
        match self.uniform(name) {
            Some(GlCall::SetFloat4 { value, .. }) => Some(*value),
            _ => None,
        }
    }

    /// Uniform names in the order they were first set.
    pub fn uniform_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.calls.iter().filter_map(GlCall::uniform_name) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Texture currently bound to a unit.
    pub fn bound_texture(&self, unit: u32) -> Option<TextureHandle> {
        self.units.get(&unit).copied()
    }

    /// Texture the named sampler uniform will read from.
    pub fn sampled_texture(&self, sampler: &str) -> Option<TextureHandle> {
        let unit = u32::try_from(self.sampler(sampler)?).ok()?;
        self.bound_texture(unit)
    }
}

impl GraphicsApi for RecordingGraphics {
    fn active_texture(&mut self, unit: u32) {
        self.active_unit = unit;
        self.calls.push(GlCall::ActiveTexture { unit });
    }

    fn bind_texture_2d(&mut self, texture: TextureHandle) {
        self.units.insert(self.active_unit, texture);
        self.calls.push(GlCall::BindTexture2d { texture });
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.calls.push(GlCall::SetInt {
            name: name.to_string(),
            value,
        });
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.calls.push(GlCall::SetFloat {
            name: name.to_string(),
            value,
        });
    }

    fn set_float3(&mut self, name: &str, value: Vec3) {
        self.calls.push(GlCall::SetFloat3 {
            name: name.to_string(),
            value: value.to_array(),
        });
    }

    fn set_float4(&mut self, name: &str, value: Vec4) {
        self.calls.push(GlCall::SetFloat4 {
            name: name.to_string(),
            value: value.to_array(),
        });
    }

    fn set_matrix4(&mut self, name: &str, value: &Mat4) {
        self.calls.push(GlCall::SetMatrix4 {
            name: name.to_string(),
            value: value.to_cols_array(),
        });
    }
}

impl fmt::Display for RecordingGraphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for call in &self.calls {
            writeln!(f, "{call}")?;
        }
        Ok(())
    }
}
