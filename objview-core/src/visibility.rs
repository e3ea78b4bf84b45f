/// Frustum, screen-bounds and backface tests applied while projecting a face
use nalgebra::Vector3;

use crate::world::WindowSize;

/// Why a face was dropped. Rejection is all-or-nothing per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Projected depth is below `near`
    BehindNear,
    /// Projected depth is above `far`
    BeyondFar,
    /// Screen position falls outside the window
    OffScreen,
    /// Face turns its back to the camera
    BackFacing,
    /// Fewer than three corners
    Degenerate,
}

/// Front-face winding used by the optional backface test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackfaceCulling {
    #[default]
    Disabled,
    /// Faces wound counter-clockwise seen from outside are front faces
    CounterClockwise,
    /// Faces wound clockwise seen from outside are front faces
    Clockwise,
}

impl BackfaceCulling {
    pub fn next(self) -> Self {
        match self {
            Self::Disabled => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::Disabled,
        }
    }
}

/// Inclusive `[near, far]` test on the projection-stage z
pub fn check_depth(z: f64, near: f64, far: f64) -> Result<(), Rejection> {
    if z < near {
        Err(Rejection::BehindNear)
    } else if z > far {
        Err(Rejection::BeyondFar)
    } else {
        Ok(())
    }
}

/// Inclusive `[0, width] × [0, height]` test. NaN coordinates are off screen.
pub fn check_screen(x: f64, y: f64, window: WindowSize) -> Result<(), Rejection> {
    let inside = (0.0..=window.width as f64).contains(&x) && (0.0..=window.height as f64).contains(&y);
    if inside {
        Ok(())
    } else {
        Err(Rejection::OffScreen)
    }
}

/// Backface test on model-space corners.
///
/// The face normal comes from the first three corners; the face is culled
/// when its outward normal points along the direction from `eye` to the
/// face. Fewer than three corners never count as back facing.
pub fn check_facing(
    corners: &[Vector3<f64>],
    eye: &Vector3<f64>,
    culling: BackfaceCulling,
) -> Result<(), Rejection> {
    let sign = match culling {
        BackfaceCulling::Disabled => return Ok(()),
        BackfaceCulling::CounterClockwise => 1.0,
        BackfaceCulling::Clockwise => -1.0,
    };
    let [p0, p1, p2] = match corners {
        [p0, p1, p2, ..] => [p0, p1, p2],
        _ => return Ok(()),
    };

    let outward = (p1 - p0).cross(&(p2 - p0)) * sign;
    if outward.dot(&(p0 - eye)) > 0.0 {
        Err(Rejection::BackFacing)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_bounds_are_inclusive() {
        assert_eq!(check_depth(1.0, 1.0, 500.0), Ok(()));
        assert_eq!(check_depth(500.0, 1.0, 500.0), Ok(()));
        assert_eq!(check_depth(0.999, 1.0, 500.0), Err(Rejection::BehindNear));
        assert_eq!(check_depth(-3.0, 1.0, 500.0), Err(Rejection::BehindNear));
        assert_eq!(check_depth(500.001, 1.0, 500.0), Err(Rejection::BeyondFar));
    }

    #[test]
    fn test_screen_bounds_are_inclusive() {
        let window = WindowSize::new(800, 600);
        assert_eq!(check_screen(0.0, 0.0, window), Ok(()));
        assert_eq!(check_screen(800.0, 600.0, window), Ok(()));
        assert_eq!(check_screen(-0.5, 10.0, window), Err(Rejection::OffScreen));
        assert_eq!(check_screen(10.0, 600.5, window), Err(Rejection::OffScreen));
        assert_eq!(check_screen(f64::NAN, 10.0, window), Err(Rejection::OffScreen));
    }

    #[test]
    fn test_backface_culling_follows_winding() {
        // counter-clockwise seen from +z, outward normal +z
        let face = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let in_front = Vector3::new(0.0, 0.0, 5.0);
        let behind = Vector3::new(0.0, 0.0, -5.0);

        assert_eq!(check_facing(&face, &in_front, BackfaceCulling::CounterClockwise), Ok(()));
        assert_eq!(
            check_facing(&face, &behind, BackfaceCulling::CounterClockwise),
            Err(Rejection::BackFacing)
        );
        assert_eq!(
            check_facing(&face, &in_front, BackfaceCulling::Clockwise),
            Err(Rejection::BackFacing)
        );
        assert_eq!(check_facing(&face, &behind, BackfaceCulling::Disabled), Ok(()));
    }

    #[test]
    fn test_culling_cycle() {
        let mut culling = BackfaceCulling::default();
        assert_eq!(culling, BackfaceCulling::Disabled);
        for _ in 0..3 {
            culling = culling.next();
        }
        assert_eq!(culling, BackfaceCulling::Disabled);
    }
}
