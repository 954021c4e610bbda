use super::vec2::Vec2;

/// Rigid frame used to move points between a shape's local space and the
/// world. Rectangles keep one of these in sync with their center and angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Radians.
    pub rotation: f64,
    cos: f64,
    sin: f64,
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self { position, rotation, cos, sin }
    }

    /// Builds a frame from an angle given in degrees.
    pub fn from_degrees(position: Vec2, angle_degrees: f64) -> Self {
        Self::new(position, angle_degrees.to_radians())
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Local point to world point (rotation then translation).
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.rotate(point) + self.position
    }

    /// World point to local point (inverse translation then inverse rotation).
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        self.unrotate(point - self.position)
    }

    /// Rotates a direction into world space without translating it.
    pub fn rotate(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.cos - v.y * self.sin, v.x * self.sin + v.y * self.cos)
    }

    /// Rotates a world direction back into local space.
    pub fn unrotate(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.cos + v.y * self.sin, -v.x * self.sin + v.y * self.cos)
    }

    /// Local x axis expressed in world space.
    pub fn axis_x(&self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// Local y axis expressed in world space.
    pub fn axis_y(&self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        let p = Vec2::new(5.0, -3.0);
        assert_eq!(t.apply(p), p);
        assert_eq!(t.apply_inverse(p), p);
    }

    #[test]
    fn test_transform_apply_translation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), 0.0);
        let tp = t.apply(Vec2::new(1.0, 2.0));
        assert!((tp.x - 11.0).abs() < EPSILON);
        assert!((tp.y - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_combined() {
        // Rotate (1,0) to (0,1), then translate by (10,5)
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert!((tp.x - 10.0).abs() < EPSILON);
        assert!((tp.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_from_degrees_matches_radians() {
        let a = Transform::from_degrees(Vec2::new(1.0, 2.0), 30.0);
        let b = Transform::new(Vec2::new(1.0, 2.0), PI / 6.0);
        let p = Vec2::new(3.0, -1.0);
        assert!((a.apply(p) - b.apply(p)).magnitude() < EPSILON);
    }

    #[test]
    fn test_transform_round_trip() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 4.0);
        let p_local = Vec2::new(1.0, 1.0);
        let back = t.apply_inverse(t.apply(p_local));
        assert!((back - p_local).magnitude() < EPSILON);
    }

    #[test]
    fn test_transform_axes_are_orthonormal() {
        let t = Transform::from_degrees(Vec2::ZERO, 37.0);
        assert!((t.axis_x().magnitude() - 1.0).abs() < EPSILON);
        assert!((t.axis_y().magnitude() - 1.0).abs() < EPSILON);
        assert!(t.axis_x().dot(t.axis_y()).abs() < EPSILON);
        assert!((t.rotate(Vec2::X) - t.axis_x()).magnitude() < EPSILON);
        assert!((t.unrotate(t.axis_y()) - Vec2::Y).magnitude() < EPSILON);
    }
}
