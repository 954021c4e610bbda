// Axis-aligned bounding box used by the broad phase and group rejection.

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, swapping coordinates so that `min <= max`.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: min.min_components(max),
            max: min.max_components(max),
        }
    }

    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        AABB::new(center - half_extents, center + half_extents)
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = AABB { min: *first, max: *first };
        for point in rest {
            aabb.min = aabb.min.min_components(*point);
            aabb.max = aabb.max.max_components(*point);
        }
        Some(aabb)
    }

    /// Overlap test. Touching boxes count as overlapping, matching the
    /// inclusive contact tests of the narrow phase.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    /// Expands this AABB to contain `other`.
    pub fn merge(&mut self, other: &AABB) {
        self.min = self.min.min_components(other.min);
        self.max = self.max.max_components(other.max);
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
