/// objview core library - software 3D pipeline for polygon meshes
/// 
/// This library holds the stateless core of the viewer: OBJ parsing, camera
/// and world snapshots, the transform chain, visibility tests, scanline
/// rasterization into a z-buffer and the frame driver that ties them up.

pub mod camera;
pub mod frame;
pub mod geometry;
pub mod obj;
pub mod projector;
pub mod raster;
pub mod sink;
pub mod transform;
pub mod visibility;
pub mod world;

// Re-export commonly used types
pub use camera::{Camera, Movement, Orientation};
pub use frame::{render_frame, FrameStats, Palette, RenderMode, RenderOptions};
pub use geometry::{Face, FaceItem, Mesh, MeshElement, Normal, Texture, Vertex};
pub use obj::{parse_obj, ObjError};
pub use projector::{ProjectedFace, Projector};
pub use raster::{ScreenPoint, ZBuffer};
pub use sink::{Canvas, Color, Pixel, PointSink};
pub use transform::{compute_matrices, Matrices};
pub use visibility::{BackfaceCulling, Rejection};
pub use world::{WindowSize, World, WorldObject};
