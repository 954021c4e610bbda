use crate::error::{PhysicsError, PhysicsResult};
use crate::math::{Transform, Vec2};

/// Oriented rectangle. `angle` is in degrees, counter-clockwise.
///
/// The four world-space corners are cached and recomputed whenever the
/// center or the angle changes, so every mutation goes through a method.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    center: Vec2,
    width: f64,
    height: f64,
    angle: f64,
    frame: Transform,
    corners: [Vec2; 4],
}

impl Rectangle {
    pub fn new(center: Vec2, width: f64, height: f64, angle: f64) -> PhysicsResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PhysicsError::InvalidExtents { width, height });
        }
        let mut rect = Self {
            center,
            width,
            height,
            angle,
            frame: Transform::identity(),
            corners: [Vec2::ZERO; 4],
        };
        rect.refresh();
        Ok(rect)
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> PhysicsResult<Self> {
        let min = a.min_components(b);
        let max = a.max_components(b);
        Self::new((min + max) * 0.5, max.x - min.x, max.y - min.y, 0.0)
    }

    fn refresh(&mut self) {
        self.frame = Transform::from_degrees(self.center, self.angle);
        let h = self.half_extents();
        self.corners = [
            self.frame.apply(Vec2::new(-h.x, -h.y)),
            self.frame.apply(Vec2::new(h.x, -h.y)),
            self.frame.apply(Vec2::new(h.x, h.y)),
            self.frame.apply(Vec2::new(-h.x, h.y)),
        ];
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// World-space corners, counter-clockwise starting at local (-w/2, -h/2).
    pub fn corners(&self) -> &[Vec2; 4] {
        &self.corners
    }

    pub fn frame(&self) -> &Transform {
        &self.frame
    }

    pub fn set_position(&mut self, center: Vec2) {
        self.center = center;
        self.refresh();
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.refresh();
    }

    /// Moves and re-orients in one corner recomputation.
    pub fn set_pose(&mut self, center: Vec2, angle: f64) {
        self.center = center;
        self.angle = angle;
        self.refresh();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.center + delta);
    }

    /// Rigid rotation about an arbitrary pivot.
    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        self.center = self.center.rotate_about(center, angle_degrees);
        self.angle += angle_degrees;
        self.refresh();
    }

    /// The two distinct edge normals (the local axes in world space).
    pub fn axes(&self) -> [Vec2; 2] {
        [self.frame.axis_x(), self.frame.axis_y()]
    }

    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let c = &self.corners;
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Interval covered by the corners when projected on `axis`.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        self.corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            let p = c.dot(axis);
            (lo.min(p), hi.max(p))
        })
    }

    /// Distance from the center to the supporting edge in direction `axis`.
    pub fn extent_along(&self, axis: Vec2) -> f64 {
        let h = self.half_extents();
        h.x * axis.dot(self.frame.axis_x()).abs() + h.y * axis.dot(self.frame.axis_y()).abs()
    }

    /// Point-inside test in rectangle-local space, boundary inclusive.
    /// This is also the zone query used by the scoring layer.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let local = self.frame.apply_inverse(point);
        let h = self.half_extents();
        local.x.abs() <= h.x && local.y.abs() <= h.y
    }

    /// World-space translation that pushes `point` out of the rectangle
    /// through the nearer pair of edges, or `None` if the point is outside.
    pub fn point_push_out(&self, point: Vec2) -> Option<Vec2> {
        let local = self.frame.apply_inverse(point);
        let h = self.half_extents();
        let pen_x = h.x - local.x.abs();
        let pen_y = h.y - local.y.abs();
        if pen_x < 0.0 || pen_y < 0.0 {
            return None;
        }
        let local_mtv = if pen_x < pen_y {
            Vec2::new(sign_or_positive(local.x) * pen_x, 0.0)
        } else {
            Vec2::new(0.0, sign_or_positive(local.y) * pen_y)
        };
        Some(self.frame.rotate(local_mtv))
    }
}

pub(crate) fn sign_or_positive(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
