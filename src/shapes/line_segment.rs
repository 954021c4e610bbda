use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    pub fn length_squared(&self) -> f64 {
        self.a.distance_squared(self.b)
    }

    /// Direction vector from `a` to `b` (not normalized).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Unit normal, counter-clockwise from the direction. Degenerate
    /// segments fall back to +y.
    pub fn normal(&self) -> Vec2 {
        self.direction().perpendicular().normalize_or(Vec2::Y)
    }

    /// Closest point on the segment to `point`, with the clamped parameter
    /// `t` in `[0, 1]`.
    pub fn closest_point(&self, point: Vec2) -> (Vec2, f64) {
        let segment_vec = self.direction();
        let length_sq = segment_vec.magnitude_squared();
        if length_sq < 1e-12 {
            return (self.a, 0.0);
        }
        let t = ((point - self.a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
        (self.a + segment_vec * t, t)
    }

    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        let pa = self.a.dot(axis);
        let pb = self.b.dot(axis);
        (pa.min(pb), pa.max(pb))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.a += delta;
        self.b += delta;
    }

    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        self.a = self.a.rotate_about(center, angle_degrees);
        self.b = self.b.rotate_about(center, angle_degrees);
    }
}
