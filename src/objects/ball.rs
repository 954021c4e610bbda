use super::rigid_body::RigidBody;
use crate::collision::Collider;
use crate::common::BallConfig;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Shape};

/// The match ball: a point mass with a circular collider. It never spins
/// and has no propulsion; only impulses and explicit calls change its
/// velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub(crate) body: RigidBody,
    pub(crate) collider: Collider,
    radius: f64,
    start: Vec2,
}

impl Ball {
    pub fn new(position: Vec2, radius: f64, mass: f64) -> PhysicsResult<Self> {
        if !(mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass { body: "ball", mass });
        }
        let circle = Circle::new(position, radius)?;
        Ok(Self {
            body: RigidBody::new(position, mass, f64::INFINITY),
            collider: Collider::moving(Shape::Circle(circle)),
            radius,
            start: position,
        })
    }

    pub fn from_config(config: &BallConfig, position: Vec2) -> PhysicsResult<Self> {
        Self::new(position, config.radius, config.mass)
    }

    pub fn rigid(&self) -> &RigidBody {
        &self.body
    }

    pub fn rigid_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.body.velocity = velocity;
    }

    /// Teleports the ball to `position` and stops it.
    pub fn place(&mut self, position: Vec2) {
        self.body.position = position;
        self.body.velocity = Vec2::ZERO;
        self.body.angular_velocity = 0.0;
        self.body.clear_accumulators();
        self.sync_collider();
    }

    /// Back to the position the ball was created at.
    pub fn reset(&mut self) {
        self.place(self.start);
    }

    pub fn set_start(&mut self, start: Vec2) {
        self.start = start;
    }

    pub fn apply_impulse(&mut self, impulse: Vec2, contact_point: Vec2) {
        self.body.apply_impulse(impulse, contact_point);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.body.position += delta;
        self.sync_collider();
    }

    pub(crate) fn sync_collider(&mut self) {
        self.collider.shape.set_position(self.body.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_rejects_bad_parameters() {
        assert!(matches!(
            Ball::new(Vec2::ZERO, 2.0, 0.0),
            Err(PhysicsError::NonPositiveMass { body: "ball", .. })
        ));
        assert!(matches!(Ball::new(Vec2::ZERO, -1.0, 1.0), Err(PhysicsError::NegativeRadius(_))));
    }

    #[test]
    fn test_ball_place_syncs_collider_and_stops() {
        let mut ball = Ball::new(Vec2::new(10.0, 10.0), 2.0, 0.05).unwrap();
        ball.set_velocity(Vec2::new(30.0, 0.0));
        ball.place(Vec2::new(50.0, 40.0));
        assert_eq!(ball.position(), Vec2::new(50.0, 40.0));
        assert_eq!(ball.velocity(), Vec2::ZERO);
        assert_eq!(ball.collider().position(), Vec2::new(50.0, 40.0));

        ball.reset();
        assert_eq!(ball.collider().position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_ball_impulse_never_spins() {
        let mut ball = Ball::new(Vec2::ZERO, 2.0, 0.5).unwrap();
        ball.apply_impulse(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0));
        assert_eq!(ball.velocity(), Vec2::new(2.0, 2.0));
        assert_eq!(ball.rigid().angular_velocity, 0.0);
    }
}
