//! Restitution/friction coefficients and the pair lookup table.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, PhysicsResult};

/// Physical category of a collider, used to pick contact coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Ball,
    Robot,
    Structure,
}

impl BodyKind {
    pub const ALL: [BodyKind; 3] = [BodyKind::Ball, BodyKind::Robot, BodyKind::Structure];

    #[inline]
    fn index(self) -> usize {
        match self {
            BodyKind::Ball => 0,
            BodyKind::Robot => 1,
            BodyKind::Structure => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Ball => "ball",
            BodyKind::Robot => "robot",
            BodyKind::Structure => "structure",
        }
    }
}

/// Contact coefficients of a pair of interacting bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient; caps the tangential impulse at
    /// `friction * |normal impulse|`.
    pub friction: f64,
}

impl Material {
    /// Creates a new material with the given restitution and friction.
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            // Clamp values to reasonable ranges
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }

    /// Checks coefficients that bypassed `Material::new`, e.g. loaded from
    /// JSON. `name` labels the pair category in the error.
    pub fn validate(&self, name: &'static str) -> PhysicsResult<()> {
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidMaterial { name, field: "restitution", value: self.restitution });
        }
        if !(self.friction >= 0.0 && self.friction.is_finite()) {
            return Err(PhysicsError::InvalidMaterial { name, field: "friction", value: self.friction });
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.5,
            friction: 0.2,
        }
    }
}

/// Symmetric 3x3 table of coefficients indexed by the pair of body kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialTable {
    entries: [[Material; 3]; 3],
}

impl MaterialTable {
    /// Table where every pair uses `material`.
    pub fn uniform(material: Material) -> Self {
        Self { entries: [[material; 3]; 3] }
    }

    /// Sets the coefficients for the unordered pair `(a, b)`.
    pub fn set(&mut self, a: BodyKind, b: BodyKind, material: Material) {
        self.entries[a.index()][b.index()] = material;
        self.entries[b.index()][a.index()] = material;
    }

    pub fn with(mut self, a: BodyKind, b: BodyKind, material: Material) -> Self {
        self.set(a, b, material);
        self
    }

    pub fn lookup(&self, a: BodyKind, b: BodyKind) -> Material {
        self.entries[a.index()][b.index()]
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        crate::common::config::MaterialConfig::default().table()
    }
}
