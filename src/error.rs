//! Error types for routing, scenario loading and configuration.

use thiserror::Error;

/// Graph lookups that cannot produce a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("no route between {from} and {to}")]
    NoPath { from: String, to: String },

    #[error("location {0} not found in network")]
    UnknownLocation(String),
}

/// Load-time precondition violations in a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("duplicate location {0}")]
    DuplicateLocation(String),

    #[error("location {name} has a non-finite coordinate ({lat}, {lon})")]
    InvalidCoordinate { name: String, lat: f64, lon: f64 },

    #[error("center {0} is not in the coordinate table")]
    UnknownCenter(String),

    #[error("center {0} listed more than once")]
    DuplicateCenter(String),

    #[error("destination {0} is not in the coordinate table")]
    UnknownDestination(String),

    #[error("vehicle class {0} is not defined")]
    UnknownVehicleClass(String),

    #[error("vehicle class {name} is invalid: {reason}")]
    InvalidVehicleClass { name: String, reason: String },

    #[error("delivery to {destination} has non-positive volume")]
    InvalidVolume { destination: String },

    #[error("unparseable date {0}")]
    InvalidDate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed environment values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
pub type ScenarioResult<T> = Result<T, ScenarioError>;
