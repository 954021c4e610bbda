use crate::math::vec2::Vec2;

/// Dynamic state shared by every body: the ball and the robots.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Primary state
    pub position: Vec2, // World position of the center of mass
    pub velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Accumulators for forces/torques applied during a time step
    pub force: Vec2,
    pub torque: f64,

    // Physical properties
    pub mass: f64,
    /// Moment of inertia about the center of mass. `f64::INFINITY` for
    /// bodies that never spin (the ball).
    pub inertia: f64,
}

impl RigidBody {
    pub fn new(position: Vec2, mass: f64, inertia: f64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inertia,
        }
    }

    /// Moment of inertia of a solid rectangle about its center.
    pub fn rectangle_inertia(mass: f64, width: f64, height: f64) -> f64 {
        (1.0 / 12.0) * mass * (width * width + height * height)
    }

    /// 1.0 / mass, or 0.0 for a non-positive mass.
    pub fn inv_mass(&self) -> f64 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// 1.0 / inertia; 0.0 for infinite or non-positive inertia.
    pub fn inv_inertia(&self) -> f64 {
        if self.inertia > 0.0 && self.inertia.is_finite() {
            1.0 / self.inertia
        } else {
            0.0
        }
    }

    /// Whether the impulse solver can use this body.
    pub fn can_resolve(&self) -> bool {
        self.mass > 0.0 && self.inertia > 0.0
    }

    /// Velocity of the material point at world position `point`.
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        let r = point - self.position;
        self.velocity + r.perpendicular() * self.angular_velocity
    }

    /// Applies a force at the center of mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at a specific point (in world coordinates).
    /// This generates both linear force and torque.
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.force += force;
        let radius_vector = point_world - self.position;
        self.torque += radius_vector.cross(force);
    }

    pub fn apply_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    /// Instantaneous change of momentum at `contact_point` (world space).
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_point: Vec2) {
        let r = contact_point - self.position;
        self.velocity += impulse * self.inv_mass();
        self.angular_velocity += r.cross(impulse) * self.inv_inertia();
    }

    /// Should typically be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}
