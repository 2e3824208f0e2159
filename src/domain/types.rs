use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Name-keyed coordinate lookup that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    names: Vec<String>,
    coords: Vec<Coordinate>,
    index: HashMap<String, usize>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and leaves the table untouched) if `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, coord: Coordinate) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.names.len());
        self.names.push(name);
        self.coords.push(coord);
        true
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.index.get(name).map(|&i| self.coords[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> + '_ {
        self.names.iter().map(String::as_str).zip(self.coords.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinate)> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        let mut table = CoordinateTable::new();
        for (name, coord) in iter {
            table.insert(name, coord);
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub destination: String,
    pub due_date: NaiveDate,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClass {
    pub name: String,
    pub capacity: u64,
    pub hour_limit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub center: String,
    pub capacity: u64,
    pub hour_limit: f64,
    pub load: u64,
    pub hours_used: f64,
    pub deliveries: Vec<Delivery>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, center: impl Into<String>, class: &VehicleClass) -> Self {
        Vehicle {
            id: id.into(),
            center: center.into(),
            capacity: class.capacity,
            hour_limit: class.hour_limit,
            load: 0,
            hours_used: 0.0,
            deliveries: vec![],
        }
    }

    pub fn remaining_capacity(&self) -> u64 {
        self.capacity.saturating_sub(self.load)
    }

    pub fn remaining_hours(&self) -> f64 {
        self.hour_limit - self.hours_used
    }

    pub fn has_room_for(&self, volume: u64) -> bool {
        volume <= self.remaining_capacity()
    }

    pub fn can_operate(&self, hours: f64) -> bool {
        hours <= self.remaining_hours()
    }

    /// Commit the load of `delivery` if it fits. Hours are not touched.
    pub fn load_delivery(&mut self, delivery: &Delivery) -> bool {
        if !self.has_room_for(delivery.volume) {
            return false;
        }
        self.load += delivery.volume;
        self.deliveries.push(delivery.clone());
        true
    }

    pub fn log_hours(&mut self, hours: f64) {
        self.hours_used += hours;
    }
}

/// Distance and timing from the serving center to a delivery's destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub distance_km: f64,
    pub travel_hours: f64,
    pub arrival: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationOutcome {
    Assigned { vehicle_id: String },
    NoVehicle,
    NoCenter,
}

impl AllocationOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AllocationOutcome::Assigned { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            AllocationOutcome::Assigned { .. } => "assigned",
            AllocationOutcome::NoVehicle => "no_vehicle",
            AllocationOutcome::NoCenter => "no_center",
        }
    }
}

/// One record per delivery, emitted in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEvent {
    pub delivery: Delivery,
    pub center: Option<String>,
    pub outcome: AllocationOutcome,
    pub estimate: Option<TravelEstimate>,
    pub route: Option<String>,
}

impl AllocationEvent {
    pub fn vehicle_id(&self) -> Option<&str> {
        match &self.outcome {
            AllocationOutcome::Assigned { vehicle_id } => Some(vehicle_id),
            _ => None,
        }
    }
}
