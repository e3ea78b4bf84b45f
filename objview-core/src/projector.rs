/// Moves face corners through model, view, projection and viewport space
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::geometry::{Face, Vertex};
use crate::raster::ScreenPoint;
use crate::transform::Matrices;
use crate::visibility::{check_depth, check_facing, check_screen, BackfaceCulling, Rejection};
use crate::world::{WindowSize, World};

/// Every intermediate stage of one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexProjections {
    pub model: Vector4<f64>,
    pub view: Vector4<f64>,
    pub projection: Vector4<f64>,
    pub viewport: Vector4<f64>,
    /// Unrounded screen position
    pub screen: (f64, f64),
    pub point: ScreenPoint,
}

/// Screen-space corners of a face that passed every visibility test
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub points: Vec<ScreenPoint>,
}

/// Per-frame projection context
#[derive(Debug, Clone)]
pub struct Projector {
    matrices: Matrices,
    window: WindowSize,
    near: f64,
    far: f64,
    eye: Vector3<f64>,
    culling: BackfaceCulling,
}

impl Projector {
    pub fn new(world: &World, culling: BackfaceCulling) -> Self {
        Self {
            matrices: Matrices::for_world(world),
            window: world.window,
            near: world.near,
            far: world.far,
            eye: world.camera.position,
            culling,
        }
    }

    pub fn matrices(&self) -> &Matrices {
        &self.matrices
    }

    /// Run one vertex through the chain.
    ///
    /// Screen coordinates are `(width - x/w, height - y/w)` of the viewport
    /// stage, mirrored on both axes. Depth is the projection-stage z
    /// saturated into `u32`.
    pub fn project_vertex(&self, vertex: &Vertex, model: &Matrix4<f64>) -> VertexProjections {
        let model = model * vertex.to_homogeneous();
        let view = self.matrices.view * model;
        let projection = self.matrices.projection * view;
        let viewport = self.matrices.viewport * projection;

        let screen = (
            self.window.width as f64 - viewport.x / viewport.w,
            self.window.height as f64 - viewport.y / viewport.w,
        );
        let point = ScreenPoint::new(screen.0 as i32, screen.1 as i32, projection.z as u32);

        VertexProjections {
            model,
            view,
            projection,
            viewport,
            screen,
            point,
        }
    }

    /// Project every corner, stopping at the first one that fails the
    /// frustum or screen test. The optional backface test runs last.
    pub fn project_face(&self, face: &Face, model: &Matrix4<f64>) -> Result<ProjectedFace, Rejection> {
        if face.len() < 3 {
            return Err(Rejection::Degenerate);
        }

        let mut points = Vec::with_capacity(face.len());
        let mut corners = Vec::with_capacity(face.len());
        for item in &face.items {
            let stages = self.project_vertex(&item.vertex, model);
            check_depth(stages.projection.z, self.near, self.far)?;
            check_screen(stages.screen.0, stages.screen.1, self.window)?;
            points.push(stages.point);
            corners.push(stages.model.xyz());
        }

        check_facing(&corners, &self.eye, self.culling)?;
        Ok(ProjectedFace { points })
    }
}
