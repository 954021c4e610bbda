use super::Shape;
use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// Composite collider. The bounding box over all children is cached so
/// group-vs-anything tests can reject cheaply before any child pair test.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    children: Vec<Shape>,
    aabb: Option<AABB>,
}

impl Group {
    pub fn new(children: Vec<Shape>) -> Self {
        let mut group = Self { children, aabb: None };
        group.regenerate_aabb();
        group
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub fn push(&mut self, child: Shape) {
        self.children.push(child);
        self.regenerate_aabb();
    }

    /// `None` for an empty group, which never collides.
    pub fn aabb(&self) -> Option<AABB> {
        self.aabb
    }

    pub fn regenerate_aabb(&mut self) {
        self.aabb = self.children.iter().filter_map(Shape::aabb).reduce(|mut acc, b| {
            acc.merge(&b);
            acc
        });
    }

    /// Flattens every child into representative points: centers for points
    /// and circles, corners for rectangles, endpoints for segments. Nested
    /// groups are walked recursively.
    pub fn extract_points(&self) -> Vec<Vec2> {
        let mut points = Vec::new();
        collect_points(&self.children, &mut points);
        points
    }

    /// Mean of the representative points; the group's reference position.
    pub fn centroid(&self) -> Vec2 {
        let points = self.extract_points();
        if points.is_empty() {
            return Vec2::ZERO;
        }
        let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        sum / points.len() as f64
    }

    pub fn translate(&mut self, delta: Vec2) {
        for child in &mut self.children {
            child.translate(delta);
        }
        self.regenerate_aabb();
    }

    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        for child in &mut self.children {
            child.rotate(angle_degrees, center);
        }
        self.regenerate_aabb();
    }
}

fn collect_points(children: &[Shape], out: &mut Vec<Vec2>) {
    for child in children {
        match child {
            Shape::Point(p) => out.push(p.position),
            Shape::Circle(c) => out.push(c.center),
            Shape::Rectangle(r) => out.extend_from_slice(r.corners()),
            Shape::Line(l) => {
                out.push(l.a);
                out.push(l.b);
            }
            Shape::Group(g) => collect_points(&g.children, out),
        }
    }
}
