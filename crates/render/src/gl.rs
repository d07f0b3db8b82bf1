use blockworld_common::TextureHandle;
use glam::{Mat4, Vec3, Vec4};

/// The slice of the graphics API the parameter binders drive.
///
/// Uniform setters target the currently active shader program. Texture
/// binding follows the GL model: select a unit, then bind a 2D texture to it.
pub trait GraphicsApi {
    /// Select the texture unit subsequent binds apply to.
    fn active_texture(&mut self, unit: u32);

    /// Bind a 2D texture to the active unit.
    fn bind_texture_2d(&mut self, texture: TextureHandle);

    fn set_int(&mut self, name: &str, value: i32);

    fn set_float(&mut self, name: &str, value: f32);

    fn set_float3(&mut self, name: &str, value: Vec3);

    fn set_float4(&mut self, name: &str, value: Vec4);

    fn set_matrix4(&mut self, name: &str, value: &Mat4);
}
