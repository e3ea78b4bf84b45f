use std::collections::{HashMap, HashSet};

use crate::sink::{Color, Pixel, PointSink};
use crate::world::WindowSize;

/// Per-pixel depth store that buckets accepted pixels by color.
///
/// Each pixel belongs to at most one bucket: when a closer point of another
/// color wins a pixel, the pixel moves out of its previous bucket.
#[derive(Debug, Clone)]
pub struct ZBuffer {
    width: usize,
    height: usize,
    depth: Vec<u32>,
    owner: Vec<Option<Color>>,
    buckets: HashMap<Color, HashSet<Pixel>>,
}

impl ZBuffer {
    /// Depth of a pixel nothing has been drawn to
    pub const EMPTY: u32 = u32::MAX;

    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth: vec![Self::EMPTY; size],
            owner: vec![None; size],
            buckets: HashMap::new(),
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

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Record a point if it is strictly closer than what the pixel holds.
    /// Points outside the buffer are ignored. Returns whether it was accepted.
    pub fn add_point(&mut self, x: i32, y: i32, depth: u32, color: Color) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if depth >= self.depth[i] {
            return false;
        }

        self.depth[i] = depth;
        let pixel = Pixel::new(x as u32, y as u32);
        if let Some(previous) = self.owner[i].replace(color) {
            if previous == color {
                return true;
            }
            if let Some(bucket) = self.buckets.get_mut(&previous) {
                bucket.remove(&pixel);
            }
        }
        self.buckets.entry(color).or_default().insert(pixel);
        true
    }

    pub fn depth_at(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).and_then(|i| self.owner[i])
    }

    /// Pixels currently owned by `color`, row-major
    pub fn points(&self, color: Color) -> Vec<Pixel> {
        let mut points: Vec<Pixel> = self
            .buckets
            .get(&color)
            .map(|bucket| bucket.iter().copied().collect())
            .unwrap_or_default();
        points.sort_unstable();
        points
    }

    /// Number of pixels holding a point
    pub fn len(&self) -> usize {
        self.buckets.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush every non-empty bucket to the sink as one batch per color.
    /// Order across colors is unspecified.
    pub fn transfer_to<S: PointSink + ?Sized>(self, sink: &mut S) {
        for (color, bucket) in self.buckets {
            if bucket.is_empty() {
                continue;
            }
            let mut points: Vec<Pixel> = bucket.into_iter().collect();
            points.sort_unstable();
            sink.draw_points(color, &points);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Canvas;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_starts_empty() {
        let buffer = ZBuffer::new(4, 4);
        assert_eq!(buffer.depth_at(2, 2), Some(ZBuffer::EMPTY));
        assert_eq!(buffer.color_at(2, 2), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_only_strictly_closer_points_win() {
        let mut buffer = ZBuffer::new(4, 4);
        assert!(buffer.add_point(1, 1, 10, RED));
        assert!(!buffer.add_point(1, 1, 10, BLUE));
        assert!(!buffer.add_point(1, 1, 11, BLUE));
        assert_eq!(buffer.color_at(1, 1), Some(RED));
        assert!(buffer.add_point(1, 1, 9, BLUE));
        assert_eq!(buffer.depth_at(1, 1), Some(9));
    }

    #[test]
    fn test_depth_never_increases() {
        let mut buffer = ZBuffer::new(2, 2);
        let mut last = ZBuffer::EMPTY;
        for depth in [50, 70, 20, 20, 90, 3, 40] {
            buffer.add_point(0, 1, depth, RED);
            let stored = buffer.depth_at(0, 1).unwrap();
            assert!(stored <= last);
            last = stored;
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut buffer = ZBuffer::new(4, 3);
        assert!(!buffer.add_point(-1, 0, 1, RED));
        assert!(!buffer.add_point(4, 0, 1, RED));
        assert!(!buffer.add_point(0, 3, 1, RED));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_superseded_pixel_leaves_previous_bucket() {
        let mut buffer = ZBuffer::new(4, 4);
        buffer.add_point(0, 0, 10, RED);
        buffer.add_point(1, 0, 10, RED);
        buffer.add_point(0, 0, 5, BLUE);

        assert_eq!(buffer.points(RED), vec![Pixel::new(1, 0)]);
        assert_eq!(buffer.points(BLUE), vec![Pixel::new(0, 0)]);
        assert_eq!(buffer.len(), 2);

        // winning back with the same color twice does not duplicate
        buffer.add_point(0, 0, 4, RED);
        buffer.add_point(0, 0, 2, RED);
        assert_eq!(buffer.points(RED), vec![Pixel::new(0, 0), Pixel::new(1, 0)]);
        assert!(buffer.points(BLUE).is_empty());
    }

    #[test]
    fn test_transfer_batches_per_color() {
        let mut buffer = ZBuffer::new(4, 4);
        buffer.add_point(0, 0, 10, RED);
        buffer.add_point(1, 1, 10, BLUE);
        buffer.add_point(0, 0, 1, BLUE);

        let mut canvas = Canvas::new(4, 4);
        buffer.transfer_to(&mut canvas);
        // the emptied red bucket is skipped
        assert_eq!(canvas.batches(), 1);
        assert_eq!(canvas.get(0, 0), Some(BLUE));
        assert_eq!(canvas.get(1, 1), Some(BLUE));
        assert_eq!(canvas.painted(), 2);
    }
}
