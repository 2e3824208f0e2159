use std::error::Error;
use std::path::Path;

use colored::*;
use csv::Writer;
use tracing::info;

use crate::domain::types::{AllocationEvent, AllocationOutcome, Vehicle};
use crate::utils::{format_hours, format_timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSummary {
    pub id: String,
    pub load: u64,
    pub deliveries: usize,
}

/// Render the log line for one allocation event.
pub fn log_line(event: &AllocationEvent) -> String {
    let destination = &event.delivery.destination;
    match &event.outcome {
        AllocationOutcome::Assigned { vehicle_id } => {
            let center = event.center.as_deref().unwrap_or("-");
            let route = event.route.as_deref().unwrap_or("-");
            let (hours, arrival) = match &event.estimate {
                Some(est) => (format_hours(est.travel_hours), format_timestamp(est.arrival)),
                None => ("-".to_string(), "-".to_string()),
            };
            format!(
                "{} delivered by {} via {}. {} | Estimated time: {}h | Estimated date: {}",
                destination, vehicle_id, center, route, hours, arrival
            )
        }
        AllocationOutcome::NoCenter => format!("Delivery to {} not allocated (no route).", destination),
        AllocationOutcome::NoVehicle => format!(
            "Delivery to {} was not allocated (no vehicle available).",
            destination
        ),
    }
}

/// Per-vehicle totals in the order vehicles first received a delivery.
///
/// Load is the vehicle's final load; the delivery count only includes successful
/// assignments. Under `CapacityFirst` the final load also counts volume absorbed by
/// hour-check failures after the vehicle's last successful assignment.
pub fn summarize(events: &[AllocationEvent], vehicles: &[Vehicle]) -> Vec<VehicleSummary> {
    let mut summary: Vec<VehicleSummary> = vec![];

    for id in events.iter().filter_map(AllocationEvent::vehicle_id) {
        match summary.iter_mut().find(|s| s.id == id) {
            Some(entry) => entry.deliveries += 1,
            None => summary.push(VehicleSummary { id: id.to_string(), load: 0, deliveries: 1 }),
        }
    }

    for entry in &mut summary {
        if let Some(vehicle) = vehicles.iter().find(|v| v.id == entry.id) {
            entry.load = vehicle.load;
        }
    }
    summary
}

pub fn summary_line(entry: &VehicleSummary) -> String {
    format!("{} | Load: {}kg | Deliveries: {}", entry.id, entry.load, entry.deliveries)
}

/// Print the allocation log followed by the vehicle summary. Rejections are shown in red.
pub fn print_report(events: &[AllocationEvent], summary: &[VehicleSummary]) {
    for event in events {
        let line = log_line(event);
        if event.outcome.is_assigned() {
            println!("{}", line);
        } else {
            println!("{}", line.red());
        }
    }

    println!("\n{}", "Vehicle summary:".bold());
    for entry in summary {
        println!("{}", summary_line(entry));
    }
}

/// Export one row per allocation event.
pub fn write_csv(events: &[AllocationEvent], filename: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let filename = filename.as_ref();
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record([
        "destination",
        "due_date",
        "volume",
        "center",
        "vehicle",
        "outcome",
        "travel_hours",
        "estimated_arrival",
        "route",
    ])?;

    for event in events {
        let (hours, arrival) = match &event.estimate {
            Some(est) => (format_hours(est.travel_hours), format_timestamp(est.arrival)),
            None => (String::new(), String::new()),
        };
        wtr.write_record([
            event.delivery.destination.clone(),
            event.delivery.due_date.to_string(),
            event.delivery.volume.to_string(),
            event.center.clone().unwrap_or_default(),
            event.vehicle_id().unwrap_or_default().to_string(),
            event.outcome.label().to_string(),
            hours,
            arrival,
            event.route.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    info!("Wrote {} allocation rows to {}", events.len(), filename.display());
    Ok(())
}
