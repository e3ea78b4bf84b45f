/// Integer rasterization: depth buffer, 3-axis lines and scanline fill
pub mod line;
pub mod scanline;
pub mod zbuffer;

pub use line::{draw_line, draw_outline, Line3};
pub use scanline::{fill_polygon, Edge, EdgeTable, FillStats};
pub use zbuffer::ZBuffer;

/// Screen position with z-buffer depth. Smaller depth is closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    pub depth: u32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32, depth: u32) -> Self {
        Self { x, y, depth }
    }
}
