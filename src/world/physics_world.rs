use crate::collision::{CollisionManager, ContactRecord};
use crate::common::{PhysicsConfig, SimulationConfig};
use crate::error::{PhysicsError, PhysicsResult};
use crate::integration::integrator;
use crate::objects::{Ball, Body, BodyHandle, Robot};

use super::field::Field;

/// Fixed-step match simulation.
///
/// Each [`PhysicsWorld::step`] integrates every body, then runs one
/// collision pass against the other bodies and the field structures.
/// Bodies are addressed by the [`BodyHandle`] returned when they are added.
#[derive(Debug)]
pub struct PhysicsWorld {
    bodies: Vec<Body>,
    field: Field,
    manager: CollisionManager,
    ball: Option<BodyHandle>,
    elapsed: f64,
    steps: u64,
}

impl PhysicsWorld {
    /// Creates an empty world over `field`.
    pub fn new(config: PhysicsConfig, field: Field) -> PhysicsResult<Self> {
        let manager = CollisionManager::new(config, field.center())?;
        log::info!(
            "physics world created: cell size {}, {} field structures",
            config.cell_size,
            field.structures().len()
        );
        Ok(Self { bodies: Vec::new(), field, manager, ball: None, elapsed: 0.0, steps: 0 })
    }

    /// Builds the field, the ball and every configured robot.
    pub fn from_config(config: &SimulationConfig) -> PhysicsResult<Self> {
        config.validate()?;
        let field = Field::new(&config.field)?;
        let mut world = Self::new(config.physics, field)?;
        world.add_ball(Ball::from_config(&config.ball, config.ball_start)?);
        for start in &config.robot_starts {
            world.add_robot(Robot::new(start.position, start.angle, &config.robot)?);
        }
        Ok(world)
    }

    /// Adds the match ball. A second call replaces which ball `ball()`
    /// refers to; the earlier one stays simulated.
    pub fn add_ball(&mut self, ball: Ball) -> BodyHandle {
        let handle = self.push(Body::Ball(ball));
        self.ball = Some(handle);
        handle
    }

    pub fn add_robot(&mut self, robot: Robot) -> BodyHandle {
        self.push(Body::Robot(robot))
    }

    fn push(&mut self, mut body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        body.set_handle(handle);
        self.bodies.push(body);
        handle
    }

    /// Advances the simulation by `dt` seconds and returns the number of
    /// contacts resolved. Non-positive `dt` is ignored.
    pub fn step(&mut self, dt: f64) -> usize {
        if !(dt > 0.0) {
            log::warn!("ignoring step with non-positive dt {}", dt);
            return 0;
        }

        for body in &mut self.bodies {
            integrator::integrate(body, dt);
        }
        let contacts = self.manager.detect_and_resolve(&mut self.bodies, self.field.structures());

        self.elapsed += dt;
        self.steps += 1;
        contacts
    }

    /// Puts robots back at their initial pose and the ball at its start.
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            body.reset();
        }
        self.elapsed = 0.0;
        self.steps = 0;
        log::info!("physics world reset: {} bodies", self.bodies.len());
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.and_then(|handle| self.bodies.get(handle.index())).and_then(Body::as_ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        let handle = self.ball?;
        self.bodies.get_mut(handle.index()).and_then(Body::as_ball_mut)
    }

    pub fn ball_handle(&self) -> Option<BodyHandle> {
        self.ball
    }

    pub fn robot(&self, handle: BodyHandle) -> PhysicsResult<&Robot> {
        self.body(handle)?
            .as_robot()
            .ok_or(PhysicsError::WrongBodyKind { expected: "robot", handle: handle.index() })
    }

    pub fn robot_mut(&mut self, handle: BodyHandle) -> PhysicsResult<&mut Robot> {
        self.bodies
            .get_mut(handle.index())
            .ok_or(PhysicsError::UnknownBody(handle.index()))?
            .as_robot_mut()
            .ok_or(PhysicsError::WrongBodyKind { expected: "robot", handle: handle.index() })
    }

    /// Robots in insertion order.
    pub fn robots(&self) -> impl Iterator<Item = (BodyHandle, &Robot)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(index, body)| body.as_robot().map(|robot| (BodyHandle(index), robot)))
    }

    pub fn body(&self, handle: BodyHandle) -> PhysicsResult<&Body> {
        self.bodies.get(handle.index()).ok_or(PhysicsError::UnknownBody(handle.index()))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Swaps the field; structure contacts then push toward its center.
    pub fn set_field(&mut self, field: Field) {
        self.manager.set_field_center(field.center());
        self.field = field;
    }

    pub fn manager(&self) -> &CollisionManager {
        &self.manager
    }

    pub fn reconfigure(&mut self, config: &PhysicsConfig) -> PhysicsResult<()> {
        self.manager.reconfigure(config)
    }

    /// Contacts resolved during the last step.
    pub fn last_contacts(&self) -> &[ContactRecord] {
        self.manager.last_contacts()
    }

    /// Simulated seconds since creation or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }
}
