use crate::math::vec2::Vec2;

/// Outcome of one narrow-phase pair test.
///
/// `mtv` is the translation that moves the *first* shape of the test out of
/// the second one, so swapping the arguments negates it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionResult {
    pub collided: bool,
    pub mtv: Vec2,
}

impl CollisionResult {
    pub const NONE: CollisionResult = CollisionResult { collided: false, mtv: Vec2::ZERO };

    pub fn hit(mtv: Vec2) -> Self {
        Self { collided: true, mtv }
    }

    /// Same contact seen from the other shape.
    #[inline]
    pub fn flipped(self) -> Self {
        Self { collided: self.collided, mtv: -self.mtv }
    }

    /// Collided with an MTV large enough to be worth resolving.
    pub fn is_resolvable(&self, min_mtv: f64) -> bool {
        self.collided && self.mtv.magnitude() > min_mtv
    }
}

/// Identifies a collider for one tick: either the collider owned by a body
/// or a static structure collider by its index in the structure list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderRef {
    Body(crate::objects::BodyHandle),
    Structure(usize),
}

/// A collision that was resolved during the last tick, kept for debug
/// visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord {
    pub first: ColliderRef,
    pub second: ColliderRef,
    /// MTV as computed for `first`, before any resolution.
    pub mtv: Vec2,
}
