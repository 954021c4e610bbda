pub mod field;
pub mod physics_world;

pub use field::Field;
pub use physics_world::PhysicsWorld;
