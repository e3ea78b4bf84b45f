/// First-person camera state and the input-driven updates applied to it
use nalgebra::Vector3;

/// Pitch limit in degrees; beyond it the view basis flips
pub const PITCH_LIMIT: f64 = 89.0;

/// Direction of a single camera step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Camera snapshot read by the renderer. Updates produce a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3<f64>,
    pub front: Vector3<f64>,
    pub speed: f64,
}

impl Camera {
    pub fn new(position: Vector3<f64>, front: Vector3<f64>, speed: f64) -> Self {
        Self {
            position,
            front,
            speed,
        }
    }

    pub fn up(&self) -> Vector3<f64> {
        Vector3::y()
    }

    pub fn target(&self) -> Vector3<f64> {
        self.position + self.front
    }

    /// Unit vector pointing to the camera's right
    pub fn right(&self) -> Vector3<f64> {
        self.front.cross(&self.up()).normalize()
    }

    /// Step by `speed` along `front` or along the right vector
    pub fn moved(&self, movement: Movement) -> Self {
        let delta = match movement {
            Movement::Forward => self.front * self.speed,
            Movement::Backward => -self.front * self.speed,
            Movement::Left => -self.right() * self.speed,
            Movement::Right => self.right() * self.speed,
        };
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    pub fn looking(&self, orientation: &Orientation) -> Self {
        Self {
            front: orientation.front(),
            ..*self
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.5, 0.0), -Vector3::z(), 1.0)
    }
}

/// Yaw and pitch in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Orientation whose `front()` matches `front`
    pub fn from_front(front: &Vector3<f64>) -> Self {
        let front = front.normalize();
        Self::new(
            front.z.atan2(front.x).to_degrees(),
            front.y.clamp(-1.0, 1.0).asin().to_degrees(),
        )
    }

    /// Apply a pointer offset. `dy` is positive when the pointer moves up.
    pub fn turned(&self, dx: f64, dy: f64, sensitivity: f64) -> Self {
        Self::new(self.yaw + dx * sensitivity, self.pitch + dy * sensitivity)
    }

    pub fn front(&self) -> Vector3<f64> {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(-90.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_default_orientation_faces_negative_z() {
        let front = Orientation::default().front();
        assert!(close(&front, &Vector3::new(0.0, 0.0, -1.0)));
        assert!(close(&Camera::default().front, &front));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let o = Orientation::default().turned(0.0, 1000.0, 0.5);
        assert_eq!(o.pitch, PITCH_LIMIT);
        let o = o.turned(0.0, -10_000.0, 0.5);
        assert_eq!(o.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_from_front_round_trips() {
        let o = Orientation::new(30.0, -20.0);
        let back = Orientation::from_front(&o.front());
        assert!((back.yaw - 30.0).abs() < 1e-9);
        assert!((back.pitch + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_movement_along_front_and_right() {
        let camera = Camera::new(Vector3::zeros(), -Vector3::z(), 2.0);
        assert!(close(&camera.moved(Movement::Forward).position, &Vector3::new(0.0, 0.0, -2.0)));
        assert!(close(&camera.moved(Movement::Backward).position, &Vector3::new(0.0, 0.0, 2.0)));
        // front × up for -Z front is +X
        assert!(close(&camera.moved(Movement::Right).position, &Vector3::new(2.0, 0.0, 0.0)));
        assert!(close(&camera.moved(Movement::Left).position, &Vector3::new(-2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_target_is_position_plus_front() {
        let camera = Camera::new(Vector3::new(1.0, 2.0, 3.0), Vector3::x(), 1.0);
        assert!(close(&camera.target(), &Vector3::new(2.0, 2.0, 3.0)));
    }
}
