//! Built-in Brazilian distribution network used when no scenario file is given.

use crate::domain::types::VehicleClass;
use crate::setup::init_types::{ClassCount, DeliveryPlan, FleetRecord, LocationRecord, Scenario};

const START: &str = "2025-06-01 00:00";

const LOCATIONS: [(&str, f64, f64); 23] = [
    ("Belem", -1.4558, -48.5044),
    ("Recife", -8.0476, -34.8770),
    ("Brasilia", -15.7939, -47.8828),
    ("Sao_Paulo", -23.5505, -46.6333),
    ("Florianopolis", -27.5949, -48.5480),
    ("Santarem", -2.4385, -54.6996),
    ("Maraba", -5.3686, -49.1170),
    ("Macapa", 0.0349, -51.0694),
    ("Joao_Pessoa", -7.1150, -34.8631),
    ("Maceio", -9.6498, -35.7089),
    ("Natal", -5.7945, -35.2110),
    ("Anapolis", -16.3285, -48.9526),
    ("Uberlandia", -18.9186, -48.2772),
    ("Campo_Grande", -20.4697, -54.6201),
    ("Campinas", -22.9099, -47.0626),
    ("Sorocaba", -23.5015, -47.4526),
    ("Ribeirao_Preto", -21.1784, -47.8069),
    ("Lages", -27.8150, -50.3259),
    ("Joinville", -26.3045, -48.8487),
    ("Pelotas", -31.7654, -52.3371),
    ("Porto_Alegre", -30.0346, -51.2177),
    ("Chapeco", -27.1004, -52.6152),
    ("Curitiba", -25.4284, -49.2733),
];

const CENTERS: [&str; 5] = ["Belem", "Recife", "Brasilia", "Sao_Paulo", "Florianopolis"];

/// (name, capacity kg, hour limit)
const VEHICLE_CLASSES: [(&str, u64, f64); 3] =
    [("small", 600, 8.0), ("medium", 800, 12.0), ("large", 1200, 22.0)];

/// Per center: small, medium, large counts.
const FLEET_COUNTS: [(&str, [usize; 3]); 5] = [
    ("Belem", [2, 1, 1]),
    ("Recife", [3, 1, 1]),
    ("Brasilia", [2, 2, 2]),
    ("Sao_Paulo", [4, 2, 3]),
    ("Florianopolis", [3, 3, 2]),
];

const DELIVERY_PLANS: [(&str, &[&str]); 5] = [
    ("Belem", &["Santarem", "Maraba", "Macapa"]),
    ("Recife", &["Joao_Pessoa", "Maceio", "Natal"]),
    ("Brasilia", &["Anapolis", "Uberlandia", "Campo_Grande"]),
    ("Sao_Paulo", &["Campinas", "Sorocaba", "Ribeirao_Preto"]),
    (
        "Florianopolis",
        &["Lages", "Joinville", "Pelotas", "Porto_Alegre", "Chapeco", "Curitiba"],
    ),
];

pub fn scenario() -> Scenario {
    Scenario {
        start: START.to_string(),
        locations: LOCATIONS
            .iter()
            .map(|&(name, lat, lon)| LocationRecord { name: name.to_string(), lat, lon })
            .collect(),
        centers: CENTERS.iter().map(|c| c.to_string()).collect(),
        vehicle_classes: VEHICLE_CLASSES
            .iter()
            .map(|&(name, capacity, hour_limit)| VehicleClass {
                name: name.to_string(),
                capacity,
                hour_limit,
            })
            .collect(),
        fleets: FLEET_COUNTS
            .iter()
            .map(|(center, counts)| FleetRecord {
                center: center.to_string(),
                vehicles: VEHICLE_CLASSES
                    .iter()
                    .zip(counts.iter())
                    .map(|(&(class, _, _), &count)| ClassCount { class: class.to_string(), count })
                    .collect(),
            })
            .collect(),
        deliveries: DELIVERY_PLANS
            .iter()
            .map(|(center, destinations)| DeliveryPlan {
                center: center.to_string(),
                destinations: destinations.iter().map(|d| d.to_string()).collect(),
                volumes: vec![],
            })
            .collect(),
    }
}
