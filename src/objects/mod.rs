pub mod ball;
pub mod rigid_body;
pub mod robot;

pub use ball::Ball;
pub use rigid_body::RigidBody;
pub use robot::Robot;

use crate::collision::Collider;
use crate::common::BodyKind;
use crate::math::vec2::Vec2;

/// Index of a body in the world's body list. Colliders carry one to find
/// their owner without holding a reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Every simulated body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Ball(Ball),
    Robot(Robot),
}

impl Body {
    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Ball(_) => BodyKind::Ball,
            Body::Robot(_) => BodyKind::Robot,
        }
    }

    pub fn rigid(&self) -> &RigidBody {
        match self {
            Body::Ball(ball) => &ball.body,
            Body::Robot(robot) => &robot.body,
        }
    }

    pub fn rigid_mut(&mut self) -> &mut RigidBody {
        match self {
            Body::Ball(ball) => &mut ball.body,
            Body::Robot(robot) => &mut robot.body,
        }
    }

    pub fn collider(&self) -> &Collider {
        match self {
            Body::Ball(ball) => &ball.collider,
            Body::Robot(robot) => &robot.collider,
        }
    }

    pub fn handle(&self) -> Option<BodyHandle> {
        self.collider().owner
    }

    /// Binds the collider's back-reference to `handle`.
    pub fn set_handle(&mut self, handle: BodyHandle) {
        match self {
            Body::Ball(ball) => ball.collider.owner = Some(handle),
            Body::Robot(robot) => robot.collider.owner = Some(handle),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.rigid().position
    }

    /// Moves the body and its collider together.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Body::Ball(ball) => ball.translate(delta),
            Body::Robot(robot) => robot.translate(delta),
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2, contact_point: Vec2) {
        self.rigid_mut().apply_impulse(impulse, contact_point);
    }

    pub fn reset(&mut self) {
        match self {
            Body::Ball(ball) => ball.reset(),
            Body::Robot(robot) => robot.reset(),
        }
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Body::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            Body::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_robot(&self) -> Option<&Robot> {
        match self {
            Body::Robot(robot) => Some(robot),
            _ => None,
        }
    }

    pub fn as_robot_mut(&mut self) -> Option<&mut Robot> {
        match self {
            Body::Robot(robot) => Some(robot),
            _ => None,
        }
    }
}

impl From<Ball> for Body {
    fn from(ball: Ball) -> Self {
        Body::Ball(ball)
    }
}

impl From<Robot> for Body {
    fn from(robot: Robot) -> Self {
        Body::Robot(robot)
    }
}
