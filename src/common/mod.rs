pub mod config;
pub mod material;

pub use config::{BallConfig, FieldDimensions, MaterialConfig, PhysicsConfig, RobotConfig, RobotStart, SimulationConfig};
pub use material::{BodyKind, Material, MaterialTable};
