/// Frame driver: projects, filters and rasterizes every face of every object
use std::collections::HashMap;

use crate::projector::Projector;
use crate::raster::{draw_outline, fill_polygon, FillStats, ZBuffer};
use crate::sink::{Color, PointSink};
use crate::visibility::{BackfaceCulling, Rejection};
use crate::world::World;

/// How visible faces are rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Filled,
    Wireframe,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Filled => Self::Wireframe,
            Self::Wireframe => Self::Filled,
        }
    }
}

/// Face colors, picked by face index
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Single-color palette
    pub fn uniform(color: Color) -> Self {
        Self::new(vec![color])
    }

    pub fn color(&self, face_index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::WHITE;
        }
        self.colors[face_index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(vec![
            Color::rgb(230, 80, 70),
            Color::rgb(90, 190, 90),
            Color::rgb(80, 130, 230),
            Color::rgb(230, 200, 70),
            Color::rgb(190, 100, 210),
            Color::rgb(70, 200, 210),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub culling: BackfaceCulling,
    pub palette: Palette,
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub faces_drawn: usize,
    pub rejected: HashMap<Rejection, usize>,
    pub fill: FillStats,
    /// Pixels flushed to the sink
    pub pixels: usize,
}

impl FrameStats {
    pub fn faces_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn rejected_for(&self, reason: Rejection) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }
}

/// Render one frame of `world` and flush it to `sink`.
///
/// Per-face failures only skip that face; the frame always completes.
pub fn render_frame<S: PointSink + ?Sized>(world: &World, options: &RenderOptions, sink: &mut S) -> FrameStats {
    let mut zbuffer = ZBuffer::for_window(world.window);
    let projector = Projector::new(world, options.culling);
    let mut stats = FrameStats::default();

    for object in &world.objects {
        for (index, face) in object.mesh.faces.iter().enumerate() {
            let projected = match projector.project_face(face, &object.model) {
                Ok(projected) => projected,
                Err(reason) => {
                    log::trace!("object {} face {index} skipped: {reason:?}", object.id);
                    *stats.rejected.entry(reason).or_default() += 1;
                    continue;
                }
            };

            let color = options.palette.color(index);
            match options.mode {
                RenderMode::Filled => stats.fill += fill_polygon(&mut zbuffer, &projected.points, color),
                RenderMode::Wireframe => {
                    stats.fill.points += draw_outline(&mut zbuffer, &projected.points, color);
                }
            }
            stats.faces_drawn += 1;
        }
    }

    stats.pixels = zbuffer.len();
    log::debug!(
        "frame {}x{}: {} faces drawn, {} rejected, {} pixels",
        world.window.width,
        world.window.height,
        stats.faces_drawn,
        stats.faces_rejected(),
        stats.pixels
    );
    zbuffer.transfer_to(sink);
    stats
}
