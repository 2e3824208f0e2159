use serde::{Deserialize, Serialize};

use crate::domain::types::VehicleClass;

/// Struct to match the JSON scenario structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Simulation start, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM:SS`.
    pub start: String,
    pub locations: Vec<LocationRecord>,
    pub centers: Vec<String>,
    pub vehicle_classes: Vec<VehicleClass>,
    pub fleets: Vec<FleetRecord>,
    pub deliveries: Vec<DeliveryPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetRecord {
    pub center: String,
    pub vehicles: Vec<ClassCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCount {
    pub class: String,
    pub count: usize,
}

/// Destinations dispatched from one center, in order.
///
/// `volumes` optionally pins the volume per destination; missing entries fall back
/// to the 600/700/800 cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPlan {
    pub center: String,
    pub destinations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<u64>,
}
