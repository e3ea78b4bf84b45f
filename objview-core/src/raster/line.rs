use super::{ScreenPoint, ZBuffer};
use crate::sink::Color;

/// Bresenham walk over x, y and depth at once.
///
/// The axis with the largest delta drives the loop and advances one unit per
/// point; the other two follow their doubled-delta error terms. Both
/// endpoints are always yielded.
#[derive(Debug, Clone)]
pub struct Line3 {
    current: [i64; 3],
    step: [i64; 3],
    delta: [i64; 3],
    error: [i64; 3],
    driver: usize,
    remaining: i64,
}

impl Line3 {
    pub fn new(from: ScreenPoint, to: ScreenPoint) -> Self {
        let start = [from.x as i64, from.y as i64, from.depth as i64];
        let end = [to.x as i64, to.y as i64, to.depth as i64];

        let mut step = [0; 3];
        let mut delta = [0; 3];
        for axis in 0..3 {
            delta[axis] = (end[axis] - start[axis]).abs();
            step[axis] = (end[axis] - start[axis]).signum();
        }

        // ties go to the earlier axis: x, then y, then depth
        let mut driver = 0;
        for axis in 1..3 {
            if delta[axis] > delta[driver] {
                driver = axis;
            }
        }

        let mut error = [0; 3];
        for axis in 0..3 {
            error[axis] = 2 * delta[axis] - delta[driver];
        }

        Self {
            current: start,
            step,
            delta,
            error,
            driver,
            remaining: delta[driver] + 1,
        }
    }

    fn advance(&mut self) {
        let driver = self.driver;
        for axis in (0..3).filter(|&axis| axis != driver) {
            if self.error[axis] >= 0 {
                self.current[axis] += self.step[axis];
                self.error[axis] -= 2 * self.delta[driver];
            }
            self.error[axis] += 2 * self.delta[axis];
        }
        self.current[driver] += self.step[driver];
    }
}

impl Iterator for Line3 {
    type Item = ScreenPoint;

    fn next(&mut self) -> Option<ScreenPoint> {
        if self.remaining == 0 {
            return None;
        }
        let [x, y, depth] = self.current;
        let point = ScreenPoint::new(x as i32, y as i32, depth.clamp(0, u32::MAX as i64) as u32);

        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line3 {}

/// Draw a single-pixel-wide line into the buffer. Returns accepted points.
pub fn draw_line(zbuffer: &mut ZBuffer, from: ScreenPoint, to: ScreenPoint, color: Color) -> usize {
    Line3::new(from, to)
        .filter(|p| zbuffer.add_point(p.x, p.y, p.depth, color))
        .count()
}

/// Draw the closed outline through `points`
pub fn draw_outline(zbuffer: &mut ZBuffer, points: &[ScreenPoint], color: Color) -> usize {
    let n = points.len();
    (0..n)
        .map(|i| draw_line(zbuffer, points[i], points[(i + 1) % n], color))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32, depth: u32) -> ScreenPoint {
        ScreenPoint::new(x, y, depth)
    }

    fn walk(from: ScreenPoint, to: ScreenPoint) -> Vec<ScreenPoint> {
        Line3::new(from, to).collect()
    }

    #[test]
    fn test_single_point() {
        assert_eq!(walk(p(3, 4, 5), p(3, 4, 5)), vec![p(3, 4, 5)]);
    }

    #[test]
    fn test_horizontal_span_interpolates_depth() {
        let points = walk(p(0, 2, 10), p(4, 2, 14));
        let expected: Vec<_> = (0..=4).map(|i| p(i, 2, 10 + i as u32)).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_driving_axis_advances_one_per_point() {
        let points = walk(p(0, 0, 0), p(3, 9, 2));
        assert_eq!(points.len(), 10);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.y, i as i32);
        }
    }

    #[test]
    fn test_depth_can_drive() {
        let points = walk(p(0, 0, 100), p(2, 1, 90));
        assert_eq!(points.len(), 11);
        assert_eq!(points.first(), Some(&p(0, 0, 100)));
        assert_eq!(points.last(), Some(&p(2, 1, 90)));
    }

    #[test]
    fn test_endpoints_always_emitted() {
        let ends = [
            p(0, 0, 0),
            p(17, 3, 40),
            p(-5, 12, 7),
            p(9, -8, 0),
            p(2, 30, 31),
            p(-13, -13, 13),
            p(6, 6, 1000),
        ];
        for &a in &ends {
            for &b in &ends {
                let points = walk(a, b);
                assert_eq!(points.first(), Some(&a));
                assert_eq!(points.last(), Some(&b), "line {:?} -> {:?}", a, b);
                assert_eq!(points.len(), Line3::new(a, b).len());
            }
        }
    }

    #[test]
    fn test_consecutive_points_are_adjacent() {
        let points = walk(p(1, 1, 5), p(20, 7, 2));
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_draw_line_respects_depth() {
        let mut zbuffer = ZBuffer::new(8, 8);
        let near = Color::rgb(1, 1, 1);
        let far = Color::rgb(2, 2, 2);
        assert_eq!(draw_line(&mut zbuffer, p(0, 3, 5), p(7, 3, 5), near), 8);
        assert_eq!(draw_line(&mut zbuffer, p(0, 3, 9), p(7, 3, 9), far), 0);
        assert_eq!(zbuffer.points(near).len(), 8);
    }

    #[test]
    fn test_outline_closes_polygon() {
        let mut zbuffer = ZBuffer::new(8, 8);
        let color = Color::rgb(9, 9, 9);
        draw_outline(&mut zbuffer, &[p(1, 1, 1), p(5, 1, 1), p(5, 5, 1), p(1, 5, 1)], color);
        // 4 sides of 5 pixels sharing 4 corners
        assert_eq!(zbuffer.points(color).len(), 16);
        assert_eq!(zbuffer.color_at(1, 3), Some(color));
        assert_eq!(zbuffer.color_at(3, 3), None);
    }
}
