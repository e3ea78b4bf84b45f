use std::ops::{AddAssign, RangeInclusive};

use super::{draw_line, ScreenPoint, ZBuffer};
use crate::sink::Color;

/// Screen-space edge oriented so that `min_y <= max_y`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// x at `min_y`
    pub min_x: i32,
    pub min_y: i32,
    /// x at `max_y`
    pub max_x: i32,
    pub max_y: i32,
    /// depth at `min_y`
    pub min_depth: u32,
    /// Change of x per scanline
    pub inv_slope_x: f64,
    /// Change of depth per scanline
    pub inv_slope_depth: f64,
}

impl Edge {
    pub fn new(a: ScreenPoint, b: ScreenPoint) -> Self {
        let (low, high) = if b.y < a.y { (b, a) } else { (a, b) };
        let dy = (high.y as i64 - low.y as i64) as f64;
        // horizontal edges keep zero slopes and never become active
        let (inv_slope_x, inv_slope_depth) = if high.y == low.y {
            (0.0, 0.0)
        } else {
            (
                (high.x as i64 - low.x as i64) as f64 / dy,
                (high.depth as f64 - low.depth as f64) / dy,
            )
        };
        Self {
            min_x: low.x,
            min_y: low.y,
            max_x: high.x,
            max_y: high.y,
            min_depth: low.depth,
            inv_slope_x,
            inv_slope_depth,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.min_y == self.max_y
    }

    /// Whether the edge crosses scanline `y`; horizontal edges never do
    pub fn is_active(&self, y: i32) -> bool {
        !self.is_horizontal() && self.min_y <= y && y <= self.max_y
    }

    /// Interpolated crossing with scanline `y`
    pub fn at(&self, y: i32) -> ScreenPoint {
        let t = (y as i64 - self.min_y as i64) as f64;
        let x = self.min_x as f64 + t * self.inv_slope_x;
        let depth = self.min_depth as f64 + t * self.inv_slope_depth;
        ScreenPoint::new(x.round() as i32, y, depth.round().max(0.0) as u32)
    }
}

/// Edges of one polygon sorted by `(min_y, min_x)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeTable {
    edges: Vec<Edge>,
}

impl EdgeTable {
    /// One edge per point, pairing `points[i]` with `points[(i + 1) % n]`
    pub fn new(points: &[ScreenPoint]) -> Self {
        let n = points.len();
        let mut edges: Vec<Edge> = (0..n).map(|i| Edge::new(points[i], points[(i + 1) % n])).collect();
        edges.sort_by_key(|e| (e.min_y, e.min_x));
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Scanlines from the lowest `min_y` to the highest `max_y`
    pub fn scanlines(&self) -> Option<RangeInclusive<i32>> {
        let first = self.edges.iter().map(|e| e.min_y).min()?;
        let last = self.edges.iter().map(|e| e.max_y).max()?;
        Some(first..=last)
    }

    /// Spans to fill on scanline `y`.
    ///
    /// A vertex where one edge ends and the next one starts is crossed once;
    /// local extrema keep both crossings. Crossings are then ordered by x and
    /// paired consecutively. With an odd count the trailing crossing is
    /// joined to its predecessor instead of being dropped; the flag in the
    /// result reports that case.
    pub fn spans(&self, y: i32) -> (Vec<(ScreenPoint, ScreenPoint)>, bool) {
        let active: Vec<&Edge> = self.edges.iter().filter(|e| e.is_active(y)).collect();
        let continues = |edge: &Edge| {
            edge.max_y == y && active.iter().any(|next| next.min_y == y && next.min_x == edge.max_x)
        };
        let mut crossings: Vec<ScreenPoint> = active
            .iter()
            .filter(|&&edge| !continues(edge))
            .map(|e| e.at(y))
            .collect();
        crossings.sort_by_key(|p| (p.x, p.depth));

        let mut spans: Vec<_> = crossings.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
        let odd = crossings.len() % 2 == 1;
        if odd {
            let n = crossings.len();
            let last = crossings[n - 1];
            let partner = if n > 1 { crossings[n - 2] } else { last };
            spans.push((partner, last));
        }
        (spans, odd)
    }
}

/// Counters gathered while filling polygons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    pub scanlines: usize,
    pub spans: usize,
    pub odd_scanlines: usize,
    pub points: usize,
}

impl AddAssign for FillStats {
    fn add_assign(&mut self, other: Self) {
        self.scanlines += other.scanlines;
        self.spans += other.spans;
        self.odd_scanlines += other.odd_scanlines;
        self.points += other.points;
    }
}

/// Scanline-fill the polygon through `points` into the buffer
pub fn fill_polygon(zbuffer: &mut ZBuffer, points: &[ScreenPoint], color: Color) -> FillStats {
    let table = EdgeTable::new(points);
    let mut stats = FillStats::default();
    let Some(scanlines) = table.scanlines() else {
        return stats;
    };

    for y in scanlines {
        let (spans, odd) = table.spans(y);
        if odd {
            log::trace!("odd crossing count on scanline {y}, closing against predecessor");
            stats.odd_scanlines += 1;
        }
        stats.scanlines += 1;
        for (from, to) in spans {
            stats.spans += 1;
            stats.points += draw_line(zbuffer, from, to, color);
        }
    }
    stats
}
