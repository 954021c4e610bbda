//! Error type shared by every fallible constructor in the crate.
//!
//! Only construction-time contract violations end up here. Degenerate
//! geometry, noise-floor MTVs and invalid masses met during resolution are
//! routine and are skipped silently inside the tick.

use thiserror::Error;

/// Physics engine errors
#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("radius cannot be negative: {0}")]
    NegativeRadius(f64),

    #[error("rectangle extents must be positive: {width}x{height}")]
    InvalidExtents { width: f64, height: f64 },

    #[error("grid cell size must be positive: {0}")]
    InvalidCellSize(f64),

    #[error("{body} mass must be positive: {mass}")]
    NonPositiveMass { body: &'static str, mass: f64 },

    #[error("{name} is out of range: {value}")]
    InvalidLimit { name: &'static str, value: f64 },

    #[error("{name} material {field} is out of range: {value}")]
    InvalidMaterial { name: &'static str, field: &'static str, value: f64 },

    #[error("invalid field dimensions: {0}")]
    InvalidFieldDimensions(String),

    #[error("no body registered under handle {0}")]
    UnknownBody(usize),

    #[error("body {handle} is not a {expected}")]
    WrongBodyKind { expected: &'static str, handle: usize },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for fallible physics operations
pub type PhysicsResult<T> = Result<T, PhysicsError>;
