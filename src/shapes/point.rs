use crate::math::vec2::Vec2;

/// Zero-area collider. Used for markers and point queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec2,
}

impl Point {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        self.position = self.position.rotate_about(center, angle_degrees);
    }
}
