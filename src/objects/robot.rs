use super::rigid_body::RigidBody;
use crate::collision::Collider;
use crate::common::RobotConfig;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::shapes::{Rectangle, Shape};

/// Pose and motion captured at construction, restored by `Robot::reset`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RobotSnapshot {
    position: Vec2,
    angle: f64,
}

/// Differential-drive robot with a rectangular collider.
///
/// The heading `angle` is in radians, kept in `[0, 2π)`, and `direction` is
/// always `(cos angle, sin angle)`. Wheel speeds are commands: they become
/// forces during integration, so they keep acting until changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    pub(crate) body: RigidBody,
    pub(crate) collider: Collider,
    width: f64,
    height: f64,
    angle: f64,
    direction: Vec2,
    left_wheel_speed: f64,
    right_wheel_speed: f64,
    pub max_velocity: f64,
    pub max_angular_velocity: f64,
    pub linear_damping: f64,
    pub angular_damping: f64,
    initial: RobotSnapshot,
}

impl Robot {
    pub fn new(position: Vec2, angle: f64, config: &RobotConfig) -> PhysicsResult<Self> {
        if !(config.mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass { body: "robot", mass: config.mass });
        }
        for (name, value) in [
            ("max_velocity", config.max_velocity),
            ("max_angular_velocity", config.max_angular_velocity),
        ] {
            if !(value > 0.0) {
                return Err(PhysicsError::InvalidLimit { name, value });
            }
        }
        let angle = wrap_angle(angle);
        let rect = Rectangle::new(position, config.width, config.height, angle.to_degrees())?;
        let inertia = RigidBody::rectangle_inertia(config.mass, config.width, config.height);
        Ok(Self {
            body: RigidBody::new(position, config.mass, inertia),
            collider: Collider::moving(Shape::Rectangle(rect)),
            width: config.width,
            height: config.height,
            angle,
            direction: Vec2::from_angle(angle),
            left_wheel_speed: 0.0,
            right_wheel_speed: 0.0,
            max_velocity: config.max_velocity,
            max_angular_velocity: config.max_angular_velocity,
            linear_damping: config.linear_damping,
            angular_damping: config.angular_damping,
            initial: RobotSnapshot { position, angle },
        })
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

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Heading in radians, in `[0, 2π)`.
    pub fn heading(&self) -> f64 {
        self.angle
    }

    /// Unit vector along the heading.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Distance from the center to either wheel.
    pub fn half_wheel_distance(&self) -> f64 {
        self.width * 0.5
    }

    pub fn wheel_speeds(&self) -> (f64, f64) {
        (self.left_wheel_speed, self.right_wheel_speed)
    }

    pub fn set_wheel_speeds(&mut self, left: f64, right: f64) {
        self.left_wheel_speed = left;
        self.right_wheel_speed = right;
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.body.apply_force(force);
    }

    pub fn apply_torque(&mut self, torque: f64) {
        self.body.apply_torque(torque);
    }

    pub fn apply_impulse(&mut self, impulse: Vec2, contact_point: Vec2) {
        self.body.apply_impulse(impulse, contact_point);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.body.position += delta;
        self.sync_collider();
    }

    /// Sets the heading (radians) and keeps the direction and collider in sync.
    pub fn set_heading(&mut self, angle: f64) {
        self.angle = wrap_angle(angle);
        self.direction = Vec2::from_angle(self.angle);
        self.sync_collider();
    }

    /// Restores the construction pose, stopped, with zeroed wheel commands.
    pub fn reset(&mut self) {
        self.body.position = self.initial.position;
        self.body.velocity = Vec2::ZERO;
        self.body.angular_velocity = 0.0;
        self.body.clear_accumulators();
        self.left_wheel_speed = 0.0;
        self.right_wheel_speed = 0.0;
        self.set_heading(self.initial.angle);
    }

    /// Turns the wheel commands into a forward force along the heading and a
    /// yaw torque, added to the accumulators.
    pub(crate) fn accumulate_drive(&mut self) {
        let left_force = self.left_wheel_speed * self.body.mass;
        let right_force = self.right_wheel_speed * self.body.mass;
        let forward = (left_force + right_force) * 0.5;
        self.body.apply_force(self.direction * forward);
        self.body.apply_torque((right_force - left_force) * self.half_wheel_distance());
    }

    /// Advances the heading by `delta` radians.
    pub(crate) fn turn(&mut self, delta: f64) {
        self.angle = wrap_angle(self.angle + delta);
        self.direction = Vec2::from_angle(self.angle);
    }

    pub(crate) fn sync_collider(&mut self) {
        if let Shape::Rectangle(rect) = &mut self.collider.shape {
            rect.set_pose(self.body.position, self.angle.to_degrees());
        }
    }
}

/// Wraps an angle in radians to the range [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};
    const EPSILON: f64 = 1e-9;

    fn robot_at(x: f64, y: f64, angle: f64) -> Robot {
        Robot::new(Vec2::new(x, y), angle, &RobotConfig::default()).unwrap()
    }

    #[test]
    fn test_robot_rejects_bad_config() {
        let config = RobotConfig { mass: 0.0, ..RobotConfig::default() };
        assert!(Robot::new(Vec2::ZERO, 0.0, &config).is_err());
        let config = RobotConfig { width: -1.0, ..RobotConfig::default() };
        assert!(matches!(Robot::new(Vec2::ZERO, 0.0, &config), Err(PhysicsError::InvalidExtents { .. })));
        let config = RobotConfig { max_velocity: 0.0, ..RobotConfig::default() };
        assert!(matches!(
            Robot::new(Vec2::ZERO, 0.0, &config),
            Err(PhysicsError::InvalidLimit { name: "max_velocity", .. })
        ));
    }

    #[test]
    fn test_robot_inertia_uses_rectangle_formula() {
        let robot = robot_at(0.0, 0.0, 0.0);
        let expected = (1.0 / 12.0) * 1.0 * (64.0 + 64.0);
        assert!((robot.rigid().inertia - expected).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(-FRAC_PI_2) - 1.5 * PI).abs() < EPSILON);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < EPSILON);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-20) < TAU);
    }

    #[test]
    fn test_heading_and_direction_stay_consistent() {
        let mut robot = robot_at(0.0, 0.0, -FRAC_PI_2);
        assert!((robot.heading() - 1.5 * PI).abs() < EPSILON);
        assert!((robot.direction() - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
        robot.set_heading(PI);
        assert!((robot.direction() - Vec2::new(-1.0, 0.0)).magnitude() < EPSILON);
        assert!((robot.direction().magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_collider_follows_pose() {
        let mut robot = robot_at(10.0, 10.0, 0.0);
        robot.translate(Vec2::new(5.0, 0.0));
        robot.set_heading(FRAC_PI_2);
        let Shape::Rectangle(rect) = &robot.collider().shape else {
            panic!("robot collider must be a rectangle");
        };
        assert_eq!(rect.center(), Vec2::new(15.0, 10.0));
        assert!((rect.angle() - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_accumulate_drive() {
        let mut robot = robot_at(0.0, 0.0, 0.0);
        robot.set_wheel_speeds(10.0, 20.0);
        robot.accumulate_drive();
        // forward = mean of the wheel forces, mass 1
        assert!((robot.rigid().force - Vec2::new(15.0, 0.0)).magnitude() < EPSILON);
        // (20 - 10) * width / 2
        assert!((robot.rigid().torque - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_reset_restores_initial_pose() {
        let mut robot = robot_at(20.0, 30.0, 1.0);
        robot.set_wheel_speeds(5.0, 5.0);
        robot.translate(Vec2::new(7.0, -3.0));
        robot.set_heading(2.5);
        robot.rigid_mut().velocity = Vec2::new(4.0, 4.0);
        robot.reset();
        assert_eq!(robot.position(), Vec2::new(20.0, 30.0));
        assert!((robot.heading() - 1.0).abs() < EPSILON);
        assert_eq!(robot.velocity(), Vec2::ZERO);
        assert_eq!(robot.wheel_speeds(), (0.0, 0.0));
        assert_eq!(robot.collider().position(), Vec2::new(20.0, 30.0));
    }
}
