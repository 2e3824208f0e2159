pub mod allocation;
pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod network;
pub mod report;
pub mod setup;
pub mod simulation;
pub mod utils;

pub use allocation::{AssignmentPolicy, FleetAllocator};
pub use error::{ConfigError, RoutingError, ScenarioError};
pub use network::{ProximityGraph, Router};
