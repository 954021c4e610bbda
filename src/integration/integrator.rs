use crate::objects::{Ball, Body, Robot};

/// Advances any body by `dt` seconds.
pub fn integrate(body: &mut Body, dt: f64) {
    match body {
        Body::Ball(ball) => integrate_ball(ball, dt),
        Body::Robot(robot) => integrate_robot(robot, dt),
    }
}

/// Pure translation. Accumulated forces are discarded: the ball has no
/// propulsion of its own.
pub fn integrate_ball(ball: &mut Ball, dt: f64) {
    let body = &mut ball.body;
    body.position += body.velocity * dt;
    body.clear_accumulators();
    ball.sync_collider();
}

/// Differential-drive step using explicit Euler.
pub fn integrate_robot(robot: &mut Robot, dt: f64) {
    robot.accumulate_drive();

    let max_velocity = robot.max_velocity;
    let max_angular_velocity = robot.max_angular_velocity;
    let linear_retention = 1.0 - robot.linear_damping;
    let angular_retention = 1.0 - robot.angular_damping;

    let body = &mut robot.body;

    // --- Linear Motion --- //
    body.velocity += body.force * body.inv_mass() * dt;
    let speed = body.velocity.magnitude();
    if speed > max_velocity {
        body.velocity *= max_velocity / speed;
    }

    // --- Angular Motion --- //
    body.angular_velocity += body.torque * body.inv_inertia() * dt;
    body.angular_velocity = body.angular_velocity.max(-max_angular_velocity).min(max_angular_velocity);

    body.position += body.velocity * dt;
    let turn = body.angular_velocity * dt;

    // Rolling resistance, independent of collisions
    body.velocity *= linear_retention;
    body.angular_velocity *= angular_retention;
    body.clear_accumulators();

    robot.turn(turn);
    robot.sync_collider();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RobotConfig;
    use crate::math::vec2::Vec2;
    use crate::shapes::Shape;
    use std::f64::consts::TAU;
    const EPSILON: f64 = 1e-9; // Slightly larger epsilon for integration tests

    fn undamped_config() -> RobotConfig {
        RobotConfig { linear_damping: 0.0, angular_damping: 0.0, ..RobotConfig::default() }
    }

    #[test]
    fn test_ball_pure_translation() {
        let mut ball = Ball::new(Vec2::new(1.0, 1.0), 2.0, 0.05).unwrap();
        ball.set_velocity(Vec2::new(10.0, -5.0));
        ball.rigid_mut().apply_force(Vec2::new(100.0, 0.0));
        integrate_ball(&mut ball, 0.1);
        assert!((ball.position() - Vec2::new(2.0, 0.5)).magnitude() < EPSILON);
        assert_eq!(ball.velocity(), Vec2::new(10.0, -5.0)); // Forces ignored
        assert_eq!(ball.rigid().force, Vec2::ZERO); // Force cleared
        assert_eq!(ball.collider().position(), ball.position());
    }

    #[test]
    fn test_robot_drives_forward() {
        let mut robot = Robot::new(Vec2::ZERO, 0.0, &undamped_config()).unwrap();
        robot.set_wheel_speeds(10.0, 10.0);
        integrate_robot(&mut robot, 0.1);
        // a = F/m = 10, v = 1, p = 0.1
        assert!((robot.velocity() - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert!((robot.position() - Vec2::new(0.1, 0.0)).magnitude() < EPSILON);
        assert_eq!(robot.rigid().angular_velocity, 0.0);
        assert_eq!(robot.rigid().force, Vec2::ZERO);
    }

    #[test]
    fn test_robot_turns_in_place() {
        let mut robot = Robot::new(Vec2::ZERO, 0.0, &undamped_config()).unwrap();
        robot.set_wheel_speeds(-1.0, 1.0);
        integrate_robot(&mut robot, 0.1);
        let inertia = robot.rigid().inertia;
        // torque = (1 - (-1)) * 4
        let omega = 8.0 / inertia * 0.1;
        assert!((robot.rigid().angular_velocity - omega).abs() < EPSILON);
        assert!((robot.heading() - omega * 0.1).abs() < EPSILON);
        assert!(robot.velocity().magnitude() < EPSILON);
        let expected_dir = Vec2::from_angle(robot.heading());
        assert!((robot.direction() - expected_dir).magnitude() < EPSILON);
    }

    #[test]
    fn test_robot_clamps_speeds() {
        let config = RobotConfig { max_velocity: 5.0, max_angular_velocity: 0.5, ..undamped_config() };
        let mut robot = Robot::new(Vec2::ZERO, 0.0, &config).unwrap();
        robot.set_wheel_speeds(1000.0, 1000.0);
        robot.apply_torque(1e6);
        integrate_robot(&mut robot, 0.1);
        assert!((robot.velocity().magnitude() - 5.0).abs() < EPSILON);
        assert!((robot.rigid().angular_velocity - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_robot_heading_wraps() {
        let config = RobotConfig { max_angular_velocity: 100.0, ..undamped_config() };
        let mut robot = Robot::new(Vec2::ZERO, TAU - 0.05, &config).unwrap();
        robot.rigid_mut().angular_velocity = 1.0;
        integrate_robot(&mut robot, 0.1);
        assert!((robot.heading() - 0.05).abs() < EPSILON);
        assert!(robot.heading() >= 0.0 && robot.heading() < TAU);
    }

    #[test]
    fn test_robot_damping_applies_per_step() {
        let mut robot = Robot::new(Vec2::ZERO, 0.0, &RobotConfig::default()).unwrap();
        robot.rigid_mut().velocity = Vec2::new(10.0, 0.0);
        robot.rigid_mut().angular_velocity = 1.0;
        integrate_robot(&mut robot, 0.01);
        assert!((robot.velocity().x - 9.9).abs() < EPSILON);
        assert!((robot.rigid().angular_velocity - 0.95).abs() < EPSILON);
    }

    #[test]
    fn test_external_forces_compose_with_drive() {
        let mut robot = Robot::new(Vec2::ZERO, 0.0, &undamped_config()).unwrap();
        robot.set_wheel_speeds(10.0, 10.0);
        robot.apply_force(Vec2::new(0.0, 10.0));
        integrate_robot(&mut robot, 0.1);
        assert!((robot.velocity() - Vec2::new(1.0, 1.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_integrate_dispatch_syncs_collider() {
        let robot = Robot::new(Vec2::new(5.0, 5.0), 0.0, &undamped_config()).unwrap();
        let mut body = Body::from(robot);
        body.rigid_mut().velocity = Vec2::new(10.0, 0.0);
        body.rigid_mut().angular_velocity = 1.0;
        integrate(&mut body, 0.5);
        let Shape::Rectangle(rect) = &body.collider().shape else {
            panic!("robot collider must be a rectangle");
        };
        assert!((rect.center() - Vec2::new(10.0, 5.0)).magnitude() < EPSILON);
        assert!((rect.angle() - 0.5f64.to_degrees()).abs() < EPSILON);
    }
}
