use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::domain::fleet::CenterFleet;
use crate::domain::types::{Coordinate, CoordinateTable, Delivery, VehicleClass};
use crate::error::{ScenarioError, ScenarioResult};
use crate::fixtures::data_generator::generate_deliveries;
use crate::setup::init_types::Scenario;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Validated, immutable inputs for one simulation run.
#[derive(Debug, Clone)]
pub struct Instance {
    pub start: NaiveDateTime,
    pub coordinates: CoordinateTable,
    pub centers: Vec<String>,
    pub vehicle_classes: Vec<VehicleClass>,
    pub fleets: Vec<CenterFleet>,
    pub deliveries: Vec<Delivery>,
}

/// Read a JSON scenario from disk.
pub async fn load_scenario(path: impl AsRef<Path>) -> ScenarioResult<Scenario> {
    let path = path.as_ref();
    info!("Loading scenario from {}", path.display());
    let content = tokio::fs::read_to_string(path).await?;
    let scenario: Scenario = serde_json::from_str(&content)?;
    debug!(
        "Scenario has {} locations, {} centers",
        scenario.locations.len(),
        scenario.centers.len()
    );
    Ok(scenario)
}

pub fn parse_start(raw: &str) -> ScenarioResult<NaiveDateTime> {
    let raw = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ScenarioError::InvalidDate(raw.to_string()))
}

/// Check every load-time precondition and turn the scenario into an [`Instance`].
pub fn setup(scenario: &Scenario) -> ScenarioResult<Instance> {
    info!(
        "Starting setup with {} locations, {} centers, {} delivery plans",
        scenario.locations.len(),
        scenario.centers.len(),
        scenario.deliveries.len()
    );

    let start = parse_start(&scenario.start)?;

    let mut coordinates = CoordinateTable::new();
    for loc in &scenario.locations {
        let coord = Coordinate::new(loc.lat, loc.lon);
        if !coord.is_finite() {
            return Err(ScenarioError::InvalidCoordinate {
                name: loc.name.clone(),
                lat: loc.lat,
                lon: loc.lon,
            });
        }
        if !coordinates.insert(loc.name.clone(), coord) {
            return Err(ScenarioError::DuplicateLocation(loc.name.clone()));
        }
    }

    let mut seen = HashSet::new();
    for center in &scenario.centers {
        if !coordinates.contains(center) {
            return Err(ScenarioError::UnknownCenter(center.clone()));
        }
        if !seen.insert(center.as_str()) {
            return Err(ScenarioError::DuplicateCenter(center.clone()));
        }
    }

    for class in &scenario.vehicle_classes {
        if class.capacity == 0 {
            return Err(ScenarioError::InvalidVehicleClass {
                name: class.name.clone(),
                reason: "capacity must be positive".to_string(),
            });
        }
        if !class.hour_limit.is_finite() || class.hour_limit < 0.0 {
            return Err(ScenarioError::InvalidVehicleClass {
                name: class.name.clone(),
                reason: format!("hour limit {} is not a non-negative number", class.hour_limit),
            });
        }
    }

    let mut fleets = Vec::with_capacity(scenario.fleets.len());
    for record in &scenario.fleets {
        if !seen.contains(record.center.as_str()) {
            return Err(ScenarioError::UnknownCenter(record.center.clone()));
        }
        let mut counts = Vec::with_capacity(record.vehicles.len());
        for entry in &record.vehicles {
            if !scenario.vehicle_classes.iter().any(|c| c.name == entry.class) {
                return Err(ScenarioError::UnknownVehicleClass(entry.class.clone()));
            }
            counts.push((entry.class.clone(), entry.count));
        }
        fleets.push(CenterFleet { center: record.center.clone(), counts });
    }

    for plan in &scenario.deliveries {
        if !seen.contains(plan.center.as_str()) {
            return Err(ScenarioError::UnknownCenter(plan.center.clone()));
        }
        if let Some(missing) = plan.destinations.iter().find(|d| !coordinates.contains(d)) {
            return Err(ScenarioError::UnknownDestination(missing.clone()));
        }
    }

    let deliveries = generate_deliveries(&scenario.deliveries, start.date())?;

    info!("Setup completed successfully");

    Ok(Instance {
        start,
        coordinates,
        centers: scenario.centers.clone(),
        vehicle_classes: scenario.vehicle_classes.clone(),
        fleets,
        deliveries,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::fixtures::brazil;
    use crate::setup::init_types::{ClassCount, DeliveryPlan, FleetRecord, LocationRecord};

    fn tiny() -> Scenario {
        Scenario {
            start: "2025-06-01".to_string(),
            locations: vec![
                LocationRecord { name: "A".into(), lat: 0.0, lon: 0.0 },
                LocationRecord { name: "C".into(), lat: 1.0, lon: 0.0 },
            ],
            centers: vec!["A".into()],
            vehicle_classes: vec![VehicleClass { name: "small".into(), capacity: 600, hour_limit: 8.0 }],
            fleets: vec![FleetRecord {
                center: "A".into(),
                vehicles: vec![ClassCount { class: "small".into(), count: 1 }],
            }],
            deliveries: vec![DeliveryPlan {
                center: "A".into(),
                destinations: vec!["C".into()],
                volumes: vec![],
            }],
        }
    }

    #[test]
    fn start_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(6, 30, 0).unwrap();
        assert_eq!(parse_start("2025-06-01 06:30").unwrap(), expected);
        assert_eq!(parse_start("2025-06-01T06:30:00").unwrap(), expected);
        assert_eq!(parse_start("2025-06-01").unwrap(), expected.date().and_hms_opt(0, 0, 0).unwrap());
        assert!(matches!(parse_start("June 1st"), Err(ScenarioError::InvalidDate(_))));
    }

    #[test]
    fn builtin_scenario_sets_up() {
        let instance = setup(&brazil::scenario()).unwrap();
        assert_eq!(instance.coordinates.len(), 23);
        assert_eq!(instance.deliveries.len(), 18);
        assert_eq!(instance.deliveries[0].destination, "Santarem");
        assert_eq!(instance.start.format("%Y-%m-%d %H:%M").to_string(), "2025-06-01 00:00");
    }

    #[test]
    fn unknown_center_is_rejected() {
        let mut s = tiny();
        s.centers.push("Z".into());
        assert!(matches!(setup(&s), Err(ScenarioError::UnknownCenter(c)) if c == "Z"));
    }

    #[test]
    fn duplicate_center_is_rejected() {
        let mut s = tiny();
        s.centers.push("A".into());
        assert!(matches!(setup(&s), Err(ScenarioError::DuplicateCenter(_))));
    }

    #[test]
    fn unknown_destination_is_rejected() {
        let mut s = tiny();
        s.deliveries[0].destinations.push("Nowhere".into());
        assert!(matches!(setup(&s), Err(ScenarioError::UnknownDestination(d)) if d == "Nowhere"));
    }

    #[test]
    fn unknown_vehicle_class_is_rejected() {
        let mut s = tiny();
        s.fleets[0].vehicles.push(ClassCount { class: "huge".into(), count: 1 });
        assert!(matches!(setup(&s), Err(ScenarioError::UnknownVehicleClass(_))));
    }

    #[test]
    fn bad_coordinates_and_classes_are_rejected() {
        let mut s = tiny();
        s.locations[1].lat = f64::NAN;
        assert!(matches!(setup(&s), Err(ScenarioError::InvalidCoordinate { .. })));

        let mut s = tiny();
        s.locations.push(LocationRecord { name: "A".into(), lat: 3.0, lon: 3.0 });
        assert!(matches!(setup(&s), Err(ScenarioError::DuplicateLocation(_))));

        let mut s = tiny();
        s.vehicle_classes[0].capacity = 0;
        assert!(matches!(setup(&s), Err(ScenarioError::InvalidVehicleClass { .. })));

        let mut s = tiny();
        s.vehicle_classes[0].hour_limit = -1.0;
        assert!(matches!(setup(&s), Err(ScenarioError::InvalidVehicleClass { .. })));
    }

    #[tokio::test]
    async fn loads_scenario_from_json_file() {
        let path = std::env::temp_dir().join(format!("lastmile-scenario-{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(serde_json::to_string_pretty(&tiny()).unwrap().as_bytes()).unwrap();
        }

        let loaded = load_scenario(&path).await.unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, tiny());
    }

    #[tokio::test]
    async fn missing_file_and_bad_json_are_errors() {
        let missing = std::env::temp_dir().join("lastmile-does-not-exist.json");
        assert!(matches!(load_scenario(&missing).await, Err(ScenarioError::Io(_))));

        let path = std::env::temp_dir().join(format!("lastmile-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_scenario(&path).await;
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ScenarioError::Json(_))));
    }
}
