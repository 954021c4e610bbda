use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    radius: f64,
}

impl Circle {
    /// Rejects negative (or NaN) radii. A zero radius is allowed and
    /// behaves like a point.
    pub fn new(center: Vec2, radius: f64) -> PhysicsResult<Self> {
        if !(radius >= 0.0) {
            return Err(PhysicsError::NegativeRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        self.center = self.center.rotate_about(center, angle_degrees);
    }
}
