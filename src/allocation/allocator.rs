use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, info, span, warn, Level};

use crate::config::constant::{AVERAGE_SPEED_KMH, UNBOUNDED_RADIUS_KM};
use crate::domain::types::{AllocationEvent, AllocationOutcome, Delivery, TravelEstimate, Vehicle};
use crate::network::router::Router;

/// How a vehicle's capacity and hour checks combine when a delivery is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentPolicy {
    /// Commit only when both capacity and hours fit.
    #[default]
    Atomic,
    /// Commit the load as soon as capacity fits, then check hours. A vehicle that
    /// fails the hour check keeps the load and delivery it was given.
    CapacityFirst,
}

impl FromStr for AssignmentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atomic" => Ok(AssignmentPolicy::Atomic),
            "legacy" | "capacity-first" | "capacity_first" => Ok(AssignmentPolicy::CapacityFirst),
            other => Err(format!("unknown assignment policy: {other}")),
        }
    }
}

/// Read-only outcome of resolving a delivery against the network.
#[derive(Debug, Clone)]
struct Resolution {
    center: String,
    estimate: TravelEstimate,
    route: String,
}

/// First-fit assignment of deliveries to the vehicles of their nearest center.
pub struct FleetAllocator<'a> {
    router: Router<'a>,
    vehicles: Vec<Vehicle>,
    start: NaiveDateTime,
    radius_km: f64,
    policy: AssignmentPolicy,
}

impl<'a> FleetAllocator<'a> {
    pub fn new(router: Router<'a>, vehicles: Vec<Vehicle>, start: NaiveDateTime) -> Self {
        FleetAllocator {
            router,
            vehicles,
            start,
            radius_km: UNBOUNDED_RADIUS_KM,
            policy: AssignmentPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Radius applied when resolving a delivery's center. Unbounded by default.
    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    pub fn estimate(&self, distance_km: f64) -> TravelEstimate {
        let travel_hours = distance_km / AVERAGE_SPEED_KMH;
        let micros = (travel_hours * 3_600_000_000.0).round() as i64;
        TravelEstimate {
            distance_km,
            travel_hours,
            arrival: self.start + Duration::microseconds(micros),
        }
    }

    fn resolve(&self, delivery: &Delivery) -> Option<Resolution> {
        let nearest = self.router.nearest_center(&delivery.destination, self.radius_km)?;
        Some(Resolution {
            center: nearest.center.to_string(),
            estimate: self.estimate(nearest.distance_km),
            route: self.router.describe_route(nearest.center, &delivery.destination),
        })
    }

    /// Process `deliveries` in the given order and return one event per delivery.
    ///
    /// Center resolution and routing run in parallel; vehicle commits happen
    /// one delivery at a time in input order.
    pub fn allocate(&mut self, deliveries: &[Delivery]) -> Vec<AllocationEvent> {
        let alloc_span = span!(Level::INFO, "allocation", deliveries = deliveries.len());
        let _guard = alloc_span.enter();

        let resolutions: Vec<Option<Resolution>> = {
            let span = span!(Level::DEBUG, "resolve_routes");
            let _g = span.enter();
            let this = &*self;
            deliveries.par_iter().map(|d| this.resolve(d)).collect()
        };

        let mut events = Vec::with_capacity(deliveries.len());
        for (delivery, resolution) in deliveries.iter().zip(resolutions) {
            let event = match resolution {
                None => {
                    warn!("Delivery to {} not allocated: no center in range", delivery.destination);
                    AllocationEvent {
                        delivery: delivery.clone(),
                        center: None,
                        outcome: AllocationOutcome::NoCenter,
                        estimate: None,
                        route: None,
                    }
                }
                Some(res) => {
                    let outcome = self.commit(delivery, &res.center, res.estimate.travel_hours);
                    match &outcome {
                        AllocationOutcome::Assigned { vehicle_id } => debug!(
                            "{} ({}) -> {} via {} ({:.1}h)",
                            delivery.destination,
                            delivery.volume,
                            vehicle_id,
                            res.center,
                            res.estimate.travel_hours
                        ),
                        _ => warn!(
                            "Delivery to {} not allocated: no vehicle at {} fits {} / {:.1}h",
                            delivery.destination, res.center, delivery.volume, res.estimate.travel_hours
                        ),
                    }
                    AllocationEvent {
                        delivery: delivery.clone(),
                        center: Some(res.center),
                        outcome,
                        estimate: Some(res.estimate),
                        route: Some(res.route),
                    }
                }
            };
            events.push(event);
        }

        let assigned = events.iter().filter(|e| e.outcome.is_assigned()).count();
        info!(
            "Allocation complete: {} assigned, {} unallocated",
            assigned,
            events.len() - assigned
        );
        events
    }

    /// Scan the center's vehicles in fleet order and take the first that fits.
    fn commit(&mut self, delivery: &Delivery, center: &str, hours: f64) -> AllocationOutcome {
        let policy = self.policy;
        for vehicle in self.vehicles.iter_mut().filter(|v| v.center == center) {
            let accepted = match policy {
                AssignmentPolicy::Atomic => {
                    if vehicle.has_room_for(delivery.volume) && vehicle.can_operate(hours) {
                        vehicle.load_delivery(delivery)
                    } else {
                        false
                    }
                }
                AssignmentPolicy::CapacityFirst => {
                    vehicle.load_delivery(delivery) && vehicle.can_operate(hours)
                }
            };

            if accepted {
                vehicle.log_hours(hours);
                return AllocationOutcome::Assigned { vehicle_id: vehicle.id.clone() };
            }
        }
        AllocationOutcome::NoVehicle
    }
}
