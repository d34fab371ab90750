//! Camera and lighting shared with both frontends.
//!
//! These types avoid platform APIs; the frontends only feed them viewport
//! sizes and hand the resulting matrices to [`crate::render::SceneGpu`].

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Track the drawable size; zero-sized viewports keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

/// Directional light shining from `position` toward the origin.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector from a lit surface toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

/// One ambient term plus a key and a fill light.
#[derive(Clone, Copy, Debug)]
pub struct SceneLighting {
    pub ambient: f32,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_INTENSITY,
            key: DirectionalLight {
                position: Vec3::from(KEY_LIGHT_POS),
                intensity: KEY_LIGHT_INTENSITY,
            },
            fill: DirectionalLight {
                position: Vec3::from(FILL_LIGHT_POS),
                intensity: FILL_LIGHT_INTENSITY,
            },
        }
    }
}
