pub mod aabb;
pub mod collider;
pub mod detection;
pub mod manager;
pub mod manifold;
pub mod resolution;
pub mod spatial_grid;

// Re-export key types
pub use aabb::AABB;
pub use collider::{Collider, ColliderKind, ZoneKind};
pub use manager::CollisionManager;
pub use manifold::{ColliderRef, CollisionResult, ContactRecord};
pub use resolution::Resolution;
pub use spatial_grid::SpatialGrid;
