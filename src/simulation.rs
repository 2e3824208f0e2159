use std::error::Error;

use tracing::{info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::allocation::FleetAllocator;
use crate::config::Settings;
use crate::domain::fleet::build_fleet;
use crate::domain::types::{AllocationEvent, Vehicle};
use crate::fixtures::brazil;
use crate::network::graph::ProximityGraph;
use crate::network::router::Router;
use crate::report::{print_report, summarize, write_csv, VehicleSummary};
use crate::setup::{load_scenario, setup, Instance};

/// Everything a single allocation pass produces.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub events: Vec<AllocationEvent>,
    pub vehicles: Vec<Vehicle>,
    pub summary: Vec<VehicleSummary>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build graph and fleet for `instance`, then run one deterministic allocation pass.
pub fn simulate(instance: &Instance, settings: &Settings) -> SimulationOutput {
    let graph = {
        let span = span!(Level::INFO, "build_graph", radius_km = settings.build_radius_km);
        let _guard = span.enter();
        ProximityGraph::build(&instance.centers, &instance.coordinates, settings.build_radius_km)
    };

    let fleet = build_fleet(&instance.fleets, &instance.vehicle_classes);
    let router = Router::new(&graph, &instance.centers, &instance.coordinates);

    let mut allocator =
        FleetAllocator::new(router, fleet, instance.start).with_policy(settings.assignment_policy);
    let events = allocator.allocate(&instance.deliveries);
    let vehicles = allocator.into_vehicles();
    let summary = summarize(&events, &vehicles);

    SimulationOutput { events, vehicles, summary }
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let settings = Settings::from_env()?;

    let scenario = match &settings.scenario_path {
        Some(path) => load_scenario(path).await?,
        None => {
            info!("No scenario file configured, using built-in network");
            brazil::scenario()
        }
    };

    let instance = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        setup(&scenario)?
    };

    info!(
        "Starting simulation: {} deliveries, {} centers, policy {:?}",
        instance.deliveries.len(),
        instance.centers.len(),
        settings.assignment_policy
    );

    let output = simulate(&instance, &settings);
    print_report(&output.events, &output.summary);

    if let Some(path) = &settings.report_csv {
        write_csv(&output.events, path)?;
    }

    Ok(())
}
