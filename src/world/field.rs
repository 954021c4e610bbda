use crate::collision::{Collider, ColliderKind, ZoneKind, AABB};
use crate::common::FieldDimensions;
use crate::error::PhysicsResult;
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, LineSegment, Rectangle, Shape};

/// Static match geometry: boundary structures plus query-only zones.
///
/// The boundary built by [`Field::new`] is a closed polyline running
/// counter-clockwise from the origin, with a goal notch cut into each short
/// side, and a small circle on every polyline vertex so that no body can
/// wedge itself into a joint between two segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    dimensions: Option<FieldDimensions>,
    structures: Vec<Collider>,
    zones: Vec<Collider>,
    center: Vec2,
}

impl Field {
    pub fn new(dimensions: &FieldDimensions) -> PhysicsResult<Self> {
        dimensions.validate()?;
        let vertices = boundary_vertices(dimensions);

        let mut structures = Vec::with_capacity(vertices.len() * 2);
        for (i, &start) in vertices.iter().enumerate() {
            let end = vertices[(i + 1) % vertices.len()];
            structures.push(Collider::structure(Shape::Line(LineSegment::new(start, end))));
        }
        if dimensions.corner_radius > 0.0 {
            for &vertex in &vertices {
                let circle = Circle::new(vertex, dimensions.corner_radius)?;
                structures.push(Collider::structure(Shape::Circle(circle)));
            }
        }

        let zones = build_zones(dimensions)?;
        let field = Self {
            dimensions: Some(*dimensions),
            structures,
            zones,
            center: dimensions.center(),
        };
        log::info!(
            "built {}x{} field: {} structures, {} zones",
            dimensions.length,
            dimensions.width,
            field.structures.len(),
            field.zones.len()
        );
        Ok(field)
    }

    /// Custom boundary made of plain segments. The center defaults to the
    /// middle of their bounding box.
    pub fn from_segments(segments: impl IntoIterator<Item = LineSegment>) -> Self {
        let structures: Vec<Collider> = segments
            .into_iter()
            .map(|segment| Collider::structure(Shape::Line(segment)))
            .collect();
        let mut field = Self { dimensions: None, structures, zones: Vec::new(), center: Vec2::ZERO };
        field.center = field.boundary_aabb().map(|aabb| aabb.center()).unwrap_or(Vec2::ZERO);
        field
    }

    /// No structures and no zones; bodies move freely.
    pub fn empty() -> Self {
        Self { dimensions: None, structures: Vec::new(), zones: Vec::new(), center: Vec2::ZERO }
    }

    pub fn dimensions(&self) -> Option<&FieldDimensions> {
        self.dimensions.as_ref()
    }

    pub fn structures(&self) -> &[Collider] {
        &self.structures
    }

    pub fn zones(&self) -> &[Collider] {
        &self.zones
    }

    /// Point that structure contacts push bodies toward.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn add_structure(&mut self, shape: Shape) {
        self.structures.push(Collider::structure(shape));
    }

    pub fn add_zone(&mut self, zone: ZoneKind, shape: Shape) {
        self.zones.push(Collider::zone(shape, zone));
    }

    /// Bounding box of every structure collider.
    pub fn boundary_aabb(&self) -> Option<AABB> {
        self.structures.iter().filter_map(Collider::aabb).reduce(|mut acc, aabb| {
            acc.merge(&aabb);
            acc
        })
    }

    /// Whether `point` lies in any zone of the given kind.
    pub fn zone_contains(&self, zone: ZoneKind, point: Vec2) -> bool {
        self.zones
            .iter()
            .any(|collider| {
                collider.kind == ColliderKind::Zone(zone) && collider.shape.contains_point(point)
            })
    }

    /// Every zone containing `point`.
    pub fn zones_at(&self, point: Vec2) -> Vec<ZoneKind> {
        self.zones
            .iter()
            .filter(|collider| collider.shape.contains_point(point))
            .filter_map(|collider| match collider.kind {
                ColliderKind::Zone(zone) => Some(zone),
                _ => None,
            })
            .collect()
    }
}

/// Boundary polyline, counter-clockwise from the origin. The ally goal is
/// on the `x = 0` side, the enemy goal on `x = length`.
fn boundary_vertices(d: &FieldDimensions) -> Vec<Vec2> {
    let (l, w) = (d.length, d.width);
    let goal_low = (w - d.goal_width) * 0.5;
    let goal_high = (w + d.goal_width) * 0.5;
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(l, 0.0),
        Vec2::new(l, goal_low),
        Vec2::new(l + d.goal_depth, goal_low),
        Vec2::new(l + d.goal_depth, goal_high),
        Vec2::new(l, goal_high),
        Vec2::new(l, w),
        Vec2::new(0.0, w),
        Vec2::new(0.0, goal_high),
        Vec2::new(-d.goal_depth, goal_high),
        Vec2::new(-d.goal_depth, goal_low),
        Vec2::new(0.0, goal_low),
    ]
}

fn build_zones(d: &FieldDimensions) -> PhysicsResult<Vec<Collider>> {
    let (l, w) = (d.length, d.width);
    let mid = w * 0.5;
    let goal_half = d.goal_width * 0.5;
    let area_half = d.goalkeeper_area_width * 0.5;
    let placement_half = d.ball_placement_size * 0.5;
    let center = d.center();

    let rect = |a: Vec2, b: Vec2| -> PhysicsResult<Shape> { Ok(Shape::Rectangle(Rectangle::from_corners(a, b)?)) };
    Ok(vec![
        Collider::zone(
            rect(Vec2::new(-d.goal_depth, mid - goal_half), Vec2::new(0.0, mid + goal_half))?,
            ZoneKind::AllyGoal,
        ),
        Collider::zone(
            rect(Vec2::new(l, mid - goal_half), Vec2::new(l + d.goal_depth, mid + goal_half))?,
            ZoneKind::EnemyGoal,
        ),
        Collider::zone(
            rect(Vec2::new(0.0, mid - area_half), Vec2::new(d.goalkeeper_area_depth, mid + area_half))?,
            ZoneKind::AllyGoalkeeperArea,
        ),
        Collider::zone(
            rect(Vec2::new(l - d.goalkeeper_area_depth, mid - area_half), Vec2::new(l, mid + area_half))?,
            ZoneKind::EnemyGoalkeeperArea,
        ),
        Collider::zone(
            rect(center - Vec2::new(placement_half, placement_half), center + Vec2::new(placement_half, placement_half))?,
            ZoneKind::BallPlacement,
        ),
    ])
}
