/// Presentation sink: the consumer of finished frames
use crate::world::WindowSize;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pixel coordinate, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel {
    pub y: u32,
    pub x: u32,
}

impl Pixel {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Anything that can draw a batch of points in one color
pub trait PointSink {
    fn draw_points(&mut self, color: Color, points: &[Pixel]);
}

/// In-memory raster of optional colors
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
    batches: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            batches: 0,
        }
    }

    pub fn for_window(window: WindowSize) -> Self {
        Self::new(window.width as usize, window.height as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.batches = 0;
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Color>]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of `draw_points` calls since the last clear
    pub fn batches(&self) -> usize {
        self.batches
    }
}

impl PointSink for Canvas {
    fn draw_points(&mut self, color: Color, points: &[Pixel]) {
        self.batches += 1;
        for p in points {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.width && y < self.height {
                self.cells[y * self.width + x] = Some(color);
            }
        }
    }
}
