/// Scene snapshot handed to the renderer once per frame
use nalgebra::Matrix4;

use crate::camera::Camera;
use crate::geometry::Mesh;

pub const DEFAULT_NEAR: f64 = 1.0;
pub const DEFAULT_FAR: f64 = 500.0;
/// Field of view in radians
pub const DEFAULT_FIELD_OF_VIEW: f64 = 5.0;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A mesh placed in the world
#[derive(Debug, Clone)]
pub struct WorldObject {
    pub id: usize,
    pub mesh: Mesh,
    pub model: Matrix4<f64>,
}

impl WorldObject {
    /// Object placed at the origin with an identity model matrix
    pub fn new(id: usize, mesh: Mesh) -> Self {
        Self {
            id,
            mesh,
            model: Matrix4::identity(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub camera: Camera,
    pub objects: Vec<WorldObject>,
    pub window: WindowSize,
    pub near: f64,
    pub far: f64,
    pub field_of_view: f64,
}

impl World {
    pub fn new(camera: Camera, objects: Vec<WorldObject>) -> Self {
        Self {
            camera,
            objects,
            window: WindowSize::default(),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
        }
    }

    pub fn with_camera(self, camera: Camera) -> Self {
        Self { camera, ..self }
    }

    pub fn with_window(self, window: WindowSize) -> Self {
        Self { window, ..self }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Camera::default(), Vec::new())
    }
}
