use log::{error, info};
use robosoccer_physics::*;
use std::env;

const DT: f64 = 1.0 / 60.0;

fn main() {
    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|arg| arg == "--verbose");
    let filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let example = args.iter().skip(1).find(|arg| !arg.starts_with("--")).map(String::as_str).unwrap_or("kickoff");
    info!("Running example: {}", example);

    let result = match example {
        "kickoff" => run_kickoff_example(),
        "wall_bounce" => run_wall_bounce_example(),
        "scrum" => run_scrum_example(),
        _ => {
            error!("Unknown example: {}. Available examples: kickoff, wall_bounce, scrum", example);
            return;
        }
    };
    if let Err(e) = result {
        error!("Error running example: {}", e);
    }
}

/// Default match setup; the two strikers drive at the ball from the kickoff.
fn run_kickoff_example() -> PhysicsResult<()> {
    let config = SimulationConfig::default();
    let mut world = PhysicsWorld::from_config(&config)?;

    let strikers: Vec<BodyHandle> = world
        .robots()
        .filter(|(_, robot)| (robot.position().y - config.ball_start.y).abs() < 1e-6)
        .filter(|(_, robot)| (robot.position().x - config.ball_start.x).abs() < config.field.length * 0.3)
        .map(|(handle, _)| handle)
        .collect();
    for handle in &strikers {
        world.robot_mut(*handle)?.set_wheel_speeds(60.0, 60.0);
    }
    info!("{} strikers heading for the ball", strikers.len());

    for frame in 0..240 {
        let contacts = world.step(DT);
        if frame % 30 == 0 || (contacts > 0 && frame % 5 == 0) {
            log_bodies(&world, frame, contacts);
        }
    }
    log_ball_zones(&world);
    info!("Simulation finished.");
    Ok(())
}

/// Ball fired diagonally across an empty field; stops early once it reaches a goal.
fn run_wall_bounce_example() -> PhysicsResult<()> {
    let config = SimulationConfig { robot_starts: Vec::new(), ..SimulationConfig::default() };
    let mut world = PhysicsWorld::from_config(&config)?;
    if let Some(ball) = world.ball_mut() {
        ball.set_velocity(Vec2::new(140.0, 90.0));
    }

    let mut bounces = 0;
    for frame in 0..600 {
        let contacts = world.step(DT);
        if contacts > 0 {
            bounces += 1;
            if let Some(ball) = world.ball() {
                info!(
                    "Frame {}: bounce #{} at ({:.2}, {:.2}), velocity ({:.2}, {:.2})",
                    frame,
                    bounces,
                    ball.position().x,
                    ball.position().y,
                    ball.velocity().x,
                    ball.velocity().y
                );
            }
        }
        if world.ball().is_some_and(|ball| {
            world.field().zone_contains(ZoneKind::AllyGoal, ball.position())
                || world.field().zone_contains(ZoneKind::EnemyGoal, ball.position())
        }) {
            info!("Frame {}: ball entered a goal", frame);
            break;
        }
    }
    log_ball_zones(&world);
    info!("Simulation finished after {} bounces.", bounces);
    Ok(())
}

/// Six robots packed around the ball, all pushing inward.
fn run_scrum_example() -> PhysicsResult<()> {
    let config = SimulationConfig::default();
    let center = config.field.center();
    let mut world = PhysicsWorld::new(config.physics, Field::new(&config.field)?)?;
    world.add_ball(Ball::from_config(&config.ball, center)?);

    let count = 6;
    for i in 0..count {
        let angle = i as f64 * std::f64::consts::TAU / count as f64;
        let position = center + Vec2::from_angle(angle) * 12.0;
        // Face the ball
        let heading = angle + std::f64::consts::PI;
        let handle = world.add_robot(Robot::new(position, heading, &config.robot)?);
        world.robot_mut(handle)?.set_wheel_speeds(25.0, 25.0);
    }

    for frame in 0..180 {
        let contacts = world.step(DT);
        if frame % 20 == 0 {
            log_bodies(&world, frame, contacts);
            for (cell, entries) in world.manager().grid().cells() {
                log::debug!("  cell {:?}: {:?}", cell, entries);
            }
        }
    }
    for contact in world.last_contacts() {
        info!("last contact {:?} / {:?}: mtv {:?}", contact.first, contact.second, contact.mtv);
    }
    info!("Simulation finished.");
    Ok(())
}

fn log_bodies(world: &PhysicsWorld, frame: usize, contacts: usize) {
    info!("Frame {} ({} contacts):", frame, contacts);
    for body in world.bodies() {
        let position = body.position();
        match body {
            Body::Ball(ball) => info!(
                "  ball  ({:.2}, {:.2}) v=({:.2}, {:.2})",
                position.x,
                position.y,
                ball.velocity().x,
                ball.velocity().y
            ),
            Body::Robot(robot) => info!(
                "  robot ({:.2}, {:.2}) heading {:.1} deg",
                position.x,
                position.y,
                robot.heading().to_degrees()
            ),
        }
    }
}

fn log_ball_zones(world: &PhysicsWorld) {
    if let Some(ball) = world.ball() {
        let zones = world.field().zones_at(ball.position());
        info!("Ball at ({:.2}, {:.2}) is in zones {:?}", ball.position().x, ball.position().y, zones);
    }
}
