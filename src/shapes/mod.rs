pub mod circle;
pub mod group;
pub mod line_segment;
pub mod point;
pub mod rectangle;

pub use circle::Circle;
pub use group::Group;
pub use line_segment::LineSegment;
pub use point::Point;
pub use rectangle::Rectangle;

use crate::collision::detection;
use crate::collision::{CollisionResult, AABB};
use crate::math::vec2::Vec2;

/// Closed set of collider geometries. Pairwise tests dispatch on the pair
/// of variants in `collision::detection`.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Circle(Circle),
    Rectangle(Rectangle),
    Line(LineSegment),
    Group(Group),
}

impl Shape {
    /// Collision test against `other`. The returned MTV is the translation
    /// that moves `self` out of `other`.
    pub fn test(&self, other: &Shape) -> CollisionResult {
        detection::test(self, other)
    }

    /// Reference position: center for points/circles/rectangles, midpoint
    /// for segments, centroid of representative points for groups.
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Point(p) => p.position,
            Shape::Circle(c) => c.center,
            Shape::Rectangle(r) => r.center(),
            Shape::Line(l) => l.midpoint(),
            Shape::Group(g) => g.centroid(),
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Shape::Point(p) => p.position = position,
            Shape::Circle(c) => c.center = position,
            Shape::Rectangle(r) => r.set_position(position),
            other => {
                let delta = position - other.position();
                other.translate(delta);
            }
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Point(p) => p.position += delta,
            Shape::Circle(c) => c.center += delta,
            Shape::Rectangle(r) => r.translate(delta),
            Shape::Line(l) => l.translate(delta),
            Shape::Group(g) => g.translate(delta),
        }
    }

    /// Rigid rotation of the defining geometry about `center`.
    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        match self {
            Shape::Point(p) => p.rotate(angle_degrees, center),
            Shape::Circle(c) => c.rotate(angle_degrees, center),
            Shape::Rectangle(r) => r.rotate(angle_degrees, center),
            Shape::Line(l) => l.rotate(angle_degrees, center),
            Shape::Group(g) => g.rotate(angle_degrees, center),
        }
    }

    /// World-space bounding box; `None` only for an empty group.
    pub fn aabb(&self) -> Option<AABB> {
        match self {
            Shape::Point(p) => Some(AABB::new(p.position, p.position)),
            Shape::Circle(c) => Some(AABB::from_center_half_extents(
                c.center,
                Vec2::new(c.radius(), c.radius()),
            )),
            Shape::Rectangle(r) => AABB::from_points(r.corners()),
            Shape::Line(l) => Some(AABB::new(l.a, l.b)),
            Shape::Group(g) => g.aabb(),
        }
    }

    /// Boundary-inclusive point query. Segments have no interior, and a
    /// point shape only contains itself.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Shape::Point(p) => p.position == point,
            Shape::Circle(c) => c.contains_point(point),
            Shape::Rectangle(r) => r.contains_point(point),
            Shape::Line(_) => false,
            Shape::Group(g) => g.children().iter().any(|child| child.contains_point(point)),
        }
    }

    /// Distance from `position()` to the supporting boundary along the unit
    /// direction `axis`. Used to place structure contact points.
    pub fn extent_along(&self, axis: Vec2) -> f64 {
        match self {
            Shape::Point(_) => 0.0,
            Shape::Circle(c) => c.radius(),
            Shape::Rectangle(r) => r.extent_along(axis),
            Shape::Line(l) => l.direction().dot(axis).abs() * 0.5,
            Shape::Group(g) => {
                let origin = g.centroid();
                g.children()
                    .iter()
                    .map(|child| (child.position() - origin).dot(axis) + child.extent_along(axis))
                    .fold(0.0, f64::max)
            }
        }
    }
}
