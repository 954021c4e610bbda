//! 2D rigid-body physics for small-robot soccer.
//!
//! A [`PhysicsWorld`] owns a ball, a set of differential-drive robots and a
//! [`Field`] of static boundary structures. Every step integrates the bodies
//! and then runs a grid-accelerated collision pass with impulse resolution.

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Collider, ColliderKind, CollisionManager, CollisionResult, ZoneKind};
pub use common::{BodyKind, Material, PhysicsConfig, SimulationConfig};
pub use error::{PhysicsError, PhysicsResult};
pub use math::vec2::Vec2;
pub use objects::{Ball, Body, BodyHandle, RigidBody, Robot};
pub use shapes::{Circle, Group, LineSegment, Point, Rectangle, Shape};
pub use world::{Field, PhysicsWorld};
