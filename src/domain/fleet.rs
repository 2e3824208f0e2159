use tracing::{debug, info};

use crate::domain::types::{Vehicle, VehicleClass};

/// How many vehicles of each class a center owns, in class order.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterFleet {
    pub center: String,
    pub counts: Vec<(String, usize)>,
}

/// Build every vehicle in fleet order: centers as given, then each center's class order,
/// then instance number. Ids look like `Belem_SMALL_1`.
///
/// Class names without a definition in `classes` are skipped; scenario validation
/// rejects them before this point.
pub fn build_fleet(fleets: &[CenterFleet], classes: &[VehicleClass]) -> Vec<Vehicle> {
    let mut vehicles = vec![];

    for fleet in fleets {
        for (class_name, count) in &fleet.counts {
            let Some(class) = classes.iter().find(|c| &c.name == class_name) else {
                continue;
            };
            for n in 1..=*count {
                let id = format!("{}_{}_{}", fleet.center, class.name.to_uppercase(), n);
                debug!("Created vehicle {} ({}kg, {}h)", id, class.capacity, class.hour_limit);
                vehicles.push(Vehicle::new(id, fleet.center.clone(), class));
            }
        }
    }

    info!("Fleet built: {} vehicles across {} centers", vehicles.len(), fleets.len());
    vehicles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> Vec<VehicleClass> {
        vec![
            VehicleClass { name: "small".into(), capacity: 600, hour_limit: 8.0 },
            VehicleClass { name: "large".into(), capacity: 1200, hour_limit: 22.0 },
        ]
    }

    #[test]
    fn fleet_order_follows_centers_then_classes_then_index() {
        let fleets = vec![
            CenterFleet { center: "A".into(), counts: vec![("small".into(), 2), ("large".into(), 1)] },
            CenterFleet { center: "B".into(), counts: vec![("large".into(), 1)] },
        ];
        let ids: Vec<String> = build_fleet(&fleets, &classes()).into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["A_SMALL_1", "A_SMALL_2", "A_LARGE_1", "B_LARGE_1"]);
    }

    #[test]
    fn vehicles_start_empty_at_home_center() {
        let fleets = vec![CenterFleet { center: "A".into(), counts: vec![("large".into(), 1)] }];
        let fleet = build_fleet(&fleets, &classes());
        let v = &fleet[0];
        assert_eq!(v.center, "A");
        assert_eq!((v.capacity, v.hour_limit), (1200, 22.0));
        assert_eq!((v.load, v.hours_used), (0, 0.0));
        assert!(v.deliveries.is_empty());
    }

    #[test]
    fn zero_count_builds_nothing() {
        let fleets = vec![CenterFleet { center: "A".into(), counts: vec![("small".into(), 0)] }];
        assert!(build_fleet(&fleets, &classes()).is_empty());
    }
}
