use glam::{Mat4, Vec3};

/// What the post-process passes need to know about the active camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub inverse_view_projection: Mat4,
}

/// Perspective camera described by position, yaw and pitch.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 40.0, 0.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -15.0_f32.to_radians(),
            fov: 80.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 5000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Maps clip space back to world space, for position reconstruction.
    pub fn inverse_view_projection(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            inverse_view_projection: self.inverse_view_projection(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert!(cam.position.y > 0.0);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn inverse_undoes_view_projection() {
        let cam = PerspectiveCamera::default();
        let round = cam.inverse_view_projection() * cam.view_projection();
        assert!(round.abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn view_carries_position() {
        let cam = PerspectiveCamera {
            position: Vec3::new(3.0, 70.0, -2.0),
            ..PerspectiveCamera::default()
        };
        let view = cam.view();
        assert_eq!(view.position, cam.position);
        assert_eq!(view.inverse_view_projection, cam.inverse_view_projection());
    }
}
