//! Simulation parameters, loadable from JSON.
//!
//! Every struct implements `Default` and is `#[serde(default)]`, so a JSON
//! document only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use super::material::{BodyKind, Material, MaterialTable};
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;

/// Contact coefficients per interacting-pair category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub ball_robot: Material,
    pub robot_robot: Material,
    /// Moving pairs not covered above (ball against ball).
    pub fallback: Material,
    pub ball_structure: Material,
    pub robot_structure: Material,
    /// Structure pairs not covered above.
    pub structure_fallback: Material,
}

impl MaterialConfig {
    /// Rejects restitution outside [0, 1] and negative friction.
    pub fn validate(&self) -> PhysicsResult<()> {
        for (name, material) in [
            ("ball_robot", self.ball_robot),
            ("robot_robot", self.robot_robot),
            ("fallback", self.fallback),
            ("ball_structure", self.ball_structure),
            ("robot_structure", self.robot_structure),
            ("structure_fallback", self.structure_fallback),
        ] {
            material.validate(name)?;
        }
        Ok(())
    }

    /// Builds the pair lookup used by the resolvers.
    pub fn table(&self) -> MaterialTable {
        MaterialTable::uniform(self.fallback)
            .with(BodyKind::Ball, BodyKind::Robot, self.ball_robot)
            .with(BodyKind::Robot, BodyKind::Robot, self.robot_robot)
            .with(BodyKind::Structure, BodyKind::Structure, self.structure_fallback)
            .with(BodyKind::Ball, BodyKind::Structure, self.ball_structure)
            .with(BodyKind::Robot, BodyKind::Structure, self.robot_structure)
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ball_robot: Material::new(0.6, 0.1),
            robot_robot: Material::new(0.3, 0.4),
            fallback: Material::new(0.5, 0.2),
            ball_structure: Material::new(0.8, 0.0),
            robot_structure: Material::new(0.3, 0.3),
            structure_fallback: Material::new(0.5, 0.2),
        }
    }
}

/// Collision manager configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Broad-phase grid cell size, in field units.
    pub cell_size: f64,
    pub materials: MaterialConfig,
    /// Overshoot factor applied to the MTV during positional correction.
    pub position_correction: f64,
    /// Clamp on the normal impulse magnitude.
    pub max_impulse: f64,
    /// Linear velocity factor applied to both bodies after a resolved
    /// body-body collision.
    pub collision_linear_damping: f64,
    pub collision_angular_damping: f64,
    /// MTVs at or below this magnitude are not resolved.
    pub min_mtv: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            materials: MaterialConfig::default(),
            position_correction: 1.01,
            max_impulse: 100.0,
            collision_linear_damping: 0.98,
            collision_angular_damping: 0.9,
            min_mtv: 1e-6,
        }
    }
}

impl PhysicsConfig {
    /// Rejects values the grid and the resolvers cannot work with.
    pub fn validate(&self) -> PhysicsResult<()> {
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Err(PhysicsError::InvalidCellSize(self.cell_size));
        }
        for (name, value) in [
            ("position_correction", self.position_correction),
            ("max_impulse", self.max_impulse),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(PhysicsError::InvalidLimit { name, value });
            }
        }
        for (name, value) in [
            ("collision_linear_damping", self.collision_linear_damping),
            ("collision_angular_damping", self.collision_angular_damping),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(PhysicsError::InvalidLimit { name, value });
            }
        }
        if !(self.min_mtv >= 0.0 && self.min_mtv.is_finite()) {
            return Err(PhysicsError::InvalidLimit { name: "min_mtv", value: self.min_mtv });
        }
        self.materials.validate()
    }
}

/// Soccer field measurements. The origin is the bottom-left field corner,
/// `length` runs along x and `width` along y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDimensions {
    pub length: f64,
    pub width: f64,
    /// Opening of the goal mouth, along y.
    pub goal_width: f64,
    /// How far the goal notch extends behind the goal line.
    pub goal_depth: f64,
    /// Goalkeeper area extent into the field, along x.
    pub goalkeeper_area_depth: f64,
    pub goalkeeper_area_width: f64,
    /// Side of the square ball-placement zone around the center spot.
    pub ball_placement_size: f64,
    /// Radius of the circles patching every boundary vertex.
    pub corner_radius: f64,
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self {
            length: 300.0,
            width: 200.0,
            goal_width: 40.0,
            goal_depth: 10.0,
            goalkeeper_area_depth: 30.0,
            goalkeeper_area_width: 80.0,
            ball_placement_size: 20.0,
            corner_radius: 1.0,
        }
    }
}

impl FieldDimensions {
    pub fn validate(&self) -> PhysicsResult<()> {
        let positive = [
            ("length", self.length),
            ("width", self.width),
            ("goal_width", self.goal_width),
            ("goal_depth", self.goal_depth),
            ("goalkeeper_area_depth", self.goalkeeper_area_depth),
            ("goalkeeper_area_width", self.goalkeeper_area_width),
            ("ball_placement_size", self.ball_placement_size),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(PhysicsError::InvalidFieldDimensions(format!("{name} must be positive, got {value}")));
            }
        }
        if self.corner_radius < 0.0 {
            return Err(PhysicsError::NegativeRadius(self.corner_radius));
        }
        if self.goal_width >= self.width || self.goalkeeper_area_width >= self.width {
            return Err(PhysicsError::InvalidFieldDimensions(format!(
                "goal ({}) and goalkeeper area ({}) must be narrower than the field ({})",
                self.goal_width, self.goalkeeper_area_width, self.width
            )));
        }
        if 2.0 * self.goalkeeper_area_depth >= self.length {
            return Err(PhysicsError::InvalidFieldDimensions(format!(
                "goalkeeper areas ({}) overlap on a field of length {}",
                self.goalkeeper_area_depth, self.length
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.length * 0.5, self.width * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub mass: f64,
    pub radius: f64,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self { mass: 0.05, radius: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub mass: f64,
    pub width: f64,
    pub height: f64,
    pub max_velocity: f64,
    /// Radians per second.
    pub max_angular_velocity: f64,
    /// Fraction of linear velocity lost every integration step.
    pub linear_damping: f64,
    /// Fraction of angular velocity lost every integration step.
    pub angular_damping: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            width: 8.0,
            height: 8.0,
            max_velocity: 150.0,
            max_angular_velocity: 10.0,
            linear_damping: 0.01,
            angular_damping: 0.05,
        }
    }
}

/// Initial pose of one robot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotStart {
    pub position: Vec2,
    /// Heading in radians.
    pub angle: f64,
}

impl RobotStart {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self { position, angle }
    }
}

/// Everything needed to build a `PhysicsWorld` for a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub field: FieldDimensions,
    pub ball: BallConfig,
    pub robot: RobotConfig,
    pub ball_start: Vec2,
    pub robot_starts: Vec<RobotStart>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let field = FieldDimensions::default();
        let center = field.center();
        let offset = field.length * 0.25;
        let robot_starts = vec![
            RobotStart::new(center - Vec2::new(offset, 0.0), 0.0),
            RobotStart::new(center - Vec2::new(offset, field.width * 0.25), 0.0),
            RobotStart::new(center - Vec2::new(field.length * 0.45, 0.0), 0.0),
            RobotStart::new(center + Vec2::new(offset, 0.0), std::f64::consts::PI),
            RobotStart::new(center + Vec2::new(offset, field.width * 0.25), std::f64::consts::PI),
            RobotStart::new(center + Vec2::new(field.length * 0.45, 0.0), std::f64::consts::PI),
        ];
        Self {
            physics: PhysicsConfig::default(),
            field,
            ball: BallConfig::default(),
            robot: RobotConfig::default(),
            ball_start: center,
            robot_starts,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> PhysicsResult<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects the parameters the geometry and solver cannot work with.
    pub fn validate(&self) -> PhysicsResult<()> {
        self.physics.validate()?;
        self.field.validate()?;

        if !(self.ball.mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass { body: "ball", mass: self.ball.mass });
        }
        if self.ball.radius < 0.0 {
            return Err(PhysicsError::NegativeRadius(self.ball.radius));
        }

        let robot = &self.robot;
        if !(robot.mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass { body: "robot", mass: robot.mass });
        }
        if !(robot.width > 0.0 && robot.height > 0.0) {
            return Err(PhysicsError::InvalidExtents { width: robot.width, height: robot.height });
        }
        for (name, value) in [
            ("max_velocity", robot.max_velocity),
            ("max_angular_velocity", robot.max_angular_velocity),
        ] {
            if !(value > 0.0) {
                return Err(PhysicsError::InvalidLimit { name, value });
            }
        }
        for (name, value) in [("linear_damping", robot.linear_damping), ("angular_damping", robot.angular_damping)] {
            if !(0.0..1.0).contains(&value) {
                return Err(PhysicsError::InvalidLimit { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.robot_starts.len(), 6);
        assert_eq!(config.ball_start, config.field.center());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "physics": { "cell_size": 32.0 }, "ball": { "radius": 3.0 } }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.physics.cell_size, 32.0);
        assert_eq!(config.physics.max_impulse, 100.0);
        assert_eq!(config.ball.radius, 3.0);
        assert_eq!(config.ball.mass, BallConfig::default().mass);
        assert_eq!(config.robot, RobotConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::default();
        let json = config.to_json_string().unwrap();
        let parsed = SimulationConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.robot_starts.len(), config.robot_starts.len());
        assert_eq!(parsed.field.length, config.field.length);
        assert!((parsed.physics.min_mtv - config.physics.min_mtv).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let bad_cell = r#"{ "physics": { "cell_size": 0.0 } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(bad_cell),
            Err(PhysicsError::InvalidCellSize(_))
        ));
        let bad_mass = r#"{ "robot": { "mass": -1.0 } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(bad_mass),
            Err(PhysicsError::NonPositiveMass { body: "robot", .. })
        ));
        let bad_radius = r#"{ "ball": { "radius": -2.0 } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(bad_radius),
            Err(PhysicsError::NegativeRadius(_))
        ));
        let bad_goal = r#"{ "field": { "goal_width": 500.0 } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(bad_goal),
            Err(PhysicsError::InvalidFieldDimensions(_))
        ));
    }

    #[test]
    fn test_physics_config_validate() {
        assert!(PhysicsConfig::default().validate().is_ok());
        let negative_impulse = PhysicsConfig { max_impulse: -5.0, ..PhysicsConfig::default() };
        assert!(matches!(
            negative_impulse.validate(),
            Err(PhysicsError::InvalidLimit { name: "max_impulse", .. })
        ));
        let backwards = PhysicsConfig { position_correction: -1.0, ..PhysicsConfig::default() };
        assert!(backwards.validate().is_err());
        let nan_floor = PhysicsConfig { min_mtv: f64::NAN, ..PhysicsConfig::default() };
        assert!(matches!(nan_floor.validate(), Err(PhysicsError::InvalidLimit { name: "min_mtv", .. })));
        let amplifying = PhysicsConfig { collision_linear_damping: 1.5, ..PhysicsConfig::default() };
        assert!(amplifying.validate().is_err());
    }

    #[test]
    fn test_json_materials_are_range_checked() {
        let json = r#"{ "physics": { "materials": { "ball_structure": { "restitution": 5.0, "friction": -3.0 } } } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(json),
            Err(PhysicsError::InvalidMaterial { name: "ball_structure", .. })
        ));
        let json = r#"{ "physics": { "materials": { "robot_robot": { "restitution": 0.2, "friction": -0.1 } } } }"#;
        assert!(matches!(
            SimulationConfig::from_json_str(json),
            Err(PhysicsError::InvalidMaterial { name: "robot_robot", field: "friction", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ not json"),
            Err(PhysicsError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_material_config_table() {
        let materials = MaterialConfig::default();
        let table = materials.table();
        assert_eq!(table.lookup(BodyKind::Robot, BodyKind::Ball), materials.ball_robot);
        assert_eq!(table.lookup(BodyKind::Ball, BodyKind::Ball), materials.fallback);
        assert_eq!(table.lookup(BodyKind::Structure, BodyKind::Ball), materials.ball_structure);
        assert_eq!(table.lookup(BodyKind::Robot, BodyKind::Structure), materials.robot_structure);
    }
}
