use super::{CollisionResult, AABB};
use crate::math::vec2::Vec2;
use crate::objects::BodyHandle;
use crate::shapes::Shape;

/// Named field regions used by scoring and ball placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    AllyGoal,
    EnemyGoal,
    AllyGoalkeeperArea,
    EnemyGoalkeeperArea,
    BallPlacement,
}

/// Role of a collider in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    /// Attached to a body, moves every tick.
    Moving,
    /// Static field geometry; infinite mass.
    Structure,
    /// Query-only region, never part of the physics pass.
    Zone(ZoneKind),
}

/// Geometry plus its role and, for moving colliders, the body it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub kind: ColliderKind,
    /// Set when the owning body is registered with a world.
    pub owner: Option<BodyHandle>,
}

impl Collider {
    pub fn new(shape: Shape, kind: ColliderKind) -> Self {
        Self { shape, kind, owner: None }
    }

    pub fn moving(shape: Shape) -> Self {
        Self::new(shape, ColliderKind::Moving)
    }

    pub fn structure(shape: Shape) -> Self {
        Self::new(shape, ColliderKind::Structure)
    }

    pub fn zone(shape: Shape, zone: ZoneKind) -> Self {
        Self::new(shape, ColliderKind::Zone(zone))
    }

    pub fn is_moving(&self) -> bool {
        self.kind == ColliderKind::Moving
    }

    pub fn is_zone(&self) -> bool {
        matches!(self.kind, ColliderKind::Zone(_))
    }

    /// MTV moves `self` out of `other`.
    pub fn test(&self, other: &Collider) -> CollisionResult {
        self.shape.test(&other.shape)
    }

    pub fn position(&self) -> Vec2 {
        self.shape.position()
    }

    pub fn aabb(&self) -> Option<AABB> {
        self.shape.aabb()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    pub fn rotate(&mut self, angle_degrees: f64, center: Vec2) {
        self.shape.rotate(angle_degrees, center);
    }
}
