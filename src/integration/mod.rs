pub mod integrator;

pub use integrator::{integrate, integrate_ball, integrate_robot};
