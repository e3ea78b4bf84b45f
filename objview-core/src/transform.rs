/// View, projection and viewport matrices derived from a world snapshot
use nalgebra::{Matrix4, Vector3};

use crate::camera::Camera;
use crate::world::{WindowSize, World};

/// Camera-space axes the view matrix is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
    pub z_axis: Vector3<f64>,
}

impl ViewBasis {
    /// Right-handed basis with `z_axis` pointing from the target back to the
    /// camera. Undefined when `front` is parallel to `up`.
    pub fn new(camera: &Camera) -> Self {
        let z_axis = (camera.position - camera.target()).normalize();
        let x_axis = camera.up().cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis).normalize();
        Self {
            x_axis,
            y_axis,
            z_axis,
        }
    }
}

/// Per-frame matrix set. Nothing is cached between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrices {
    pub view: Matrix4<f64>,
    pub projection: Matrix4<f64>,
    pub viewport: Matrix4<f64>,
}

impl Matrices {
    pub fn for_world(world: &World) -> Self {
        compute_matrices(
            &world.camera,
            world.window,
            world.near,
            world.far,
            world.field_of_view,
        )
    }

    /// `viewport · projection · view · model`
    pub fn composed(&self, model: &Matrix4<f64>) -> Matrix4<f64> {
        self.viewport * self.projection * self.view * model
    }
}

pub fn compute_matrices(
    camera: &Camera,
    window: WindowSize,
    near: f64,
    far: f64,
    field_of_view: f64,
) -> Matrices {
    Matrices {
        view: view_matrix(camera),
        projection: projection_matrix(window, near, far, field_of_view),
        viewport: viewport_matrix(window),
    }
}

pub fn view_matrix(camera: &Camera) -> Matrix4<f64> {
    let ViewBasis {
        x_axis,
        y_axis,
        z_axis,
    } = ViewBasis::new(camera);
    let eye = camera.position;

    #[rustfmt::skip]
    let view = Matrix4::new(
        x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(&eye),
        y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(&eye),
        z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(&eye),
        0.0,      0.0,      0.0,      1.0,
    );
    view
}

pub fn projection_matrix(window: WindowSize, near: f64, far: f64, field_of_view: f64) -> Matrix4<f64> {
    let aspect = window.aspect();
    let focal = 1.0 / (field_of_view / 2.0).tan();
    let depth_scale = far / (near - far);
    let depth_offset = near * far / (near - far);

    #[rustfmt::skip]
    let projection = Matrix4::new(
        focal / aspect, 0.0,   0.0,         0.0,
        0.0,            focal, 0.0,         0.0,
        0.0,            0.0,   depth_scale, depth_offset,
        0.0,            0.0,   -1.0,        0.0,
    );
    projection
}

/// Maps clip coordinates onto pixels with y growing downwards
pub fn viewport_matrix(window: WindowSize) -> Matrix4<f64> {
    let half_width = window.width as f64 / 2.0;
    let half_height = window.height as f64 / 2.0;

    #[rustfmt::skip]
    let viewport = Matrix4::new(
        half_width, 0.0,          0.0, half_width,
        0.0,        -half_height, 0.0, half_height,
        0.0,        0.0,          1.0, 0.0,
        0.0,        0.0,          0.0, 1.0,
    );
    viewport
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Orientation;
    use nalgebra::Vector4;

    fn assert_orthonormal(basis: &ViewBasis) {
        let axes = [basis.x_axis, basis.y_axis, basis.z_axis];
        for axis in &axes {
            assert!((axis.norm() - 1.0).abs() < 1e-9);
        }
        assert!(basis.x_axis.dot(&basis.y_axis).abs() < 1e-9);
        assert!(basis.y_axis.dot(&basis.z_axis).abs() < 1e-9);
        assert!(basis.z_axis.dot(&basis.x_axis).abs() < 1e-9);
        // right-handed
        assert!((basis.x_axis.cross(&basis.y_axis) - basis.z_axis).norm() < 1e-9);
    }

    #[test]
    fn test_view_basis_orthonormal() {
        for yaw in (-180..180).step_by(37) {
            for pitch in [-89.0, -45.0, 0.0, 12.5, 89.0] {
                let orientation = Orientation::new(yaw as f64, pitch);
                let camera = Camera::new(Vector3::new(3.0, -1.0, 2.0), orientation.front(), 1.0);
                assert_orthonormal(&ViewBasis::new(&camera));
            }
        }
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Camera::new(Vector3::new(-5.0, 0.5, 0.5), Vector3::x(), 1.0);
        let view = view_matrix(&camera);
        let eye = view * Vector4::new(-5.0, 0.5, 0.5, 1.0);
        assert!(eye.xyz().norm() < 1e-12);

        // a point ahead of the camera lands on the negative z axis
        let ahead = view * Vector4::new(0.0, 0.5, 0.5, 1.0);
        assert!((ahead.z + 5.0).abs() < 1e-12);
        assert!(ahead.x.abs() < 1e-12 && ahead.y.abs() < 1e-12);
    }

    #[test]
    fn test_projection_layout() {
        let window = WindowSize::new(800, 600);
        let p = projection_matrix(window, 1.0, 500.0, 5.0);
        let focal = 1.0 / 2.5f64.tan();
        assert!((p[(0, 0)] - focal * 600.0 / 800.0).abs() < 1e-12);
        assert!((p[(1, 1)] - focal).abs() < 1e-12);
        assert!((p[(2, 2)] - 500.0 / -499.0).abs() < 1e-12);
        assert!((p[(2, 3)] - 500.0 / -499.0).abs() < 1e-12);
        assert_eq!(p[(3, 2)], -1.0);
        assert_eq!(p[(3, 3)], 0.0);
    }

    #[test]
    fn test_viewport_flips_vertical_axis() {
        let viewport = viewport_matrix(WindowSize::new(800, 600));
        let top_left = viewport * Vector4::new(-1.0, 1.0, 0.0, 1.0);
        assert_eq!((top_left.x, top_left.y), (0.0, 0.0));
        let bottom_right = viewport * Vector4::new(1.0, -1.0, 0.0, 1.0);
        assert_eq!((bottom_right.x, bottom_right.y), (800.0, 600.0));
    }

    #[test]
    fn test_composed_order() {
        let world = World::default().with_window(WindowSize::new(640, 480));
        let m = Matrices::for_world(&world);
        let model = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let expected = m.viewport * m.projection * m.view * model;
        assert_eq!(m.composed(&model), expected);
    }
}
