use tracing::trace;

use crate::distance::haversine;
use crate::domain::types::CoordinateTable;
use crate::error::RoutingError;
use crate::network::graph::{Path, ProximityGraph};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestCenter<'a> {
    pub center: &'a str,
    pub distance_km: f64,
}

/// Scan `centers` in order and keep the strictly closer candidate within `radius_km`.
///
/// Returns `None` when no center qualifies, including when `centers` is empty
/// or `destination` has no coordinate.
pub fn nearest_center<'a>(
    destination: &str,
    centers: &'a [String],
    coordinates: &CoordinateTable,
    radius_km: f64,
) -> Option<NearestCenter<'a>> {
    let target = coordinates.get(destination)?;
    let mut best: Option<NearestCenter<'a>> = None;
    let mut best_distance = f64::INFINITY;

    for center in centers {
        let Some(coord) = coordinates.get(center) else {
            continue;
        };
        let dist = haversine(coord, target);
        if dist < best_distance && dist <= radius_km {
            best_distance = dist;
            best = Some(NearestCenter { center: center.as_str(), distance_km: dist });
        }
    }

    trace!("Nearest center to {} (limit {}): {:?}", destination, radius_km, best);
    best
}

/// Read-only routing view over a built graph.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    graph: &'a ProximityGraph,
    centers: &'a [String],
    coordinates: &'a CoordinateTable,
}

impl<'a> Router<'a> {
    pub fn new(
        graph: &'a ProximityGraph,
        centers: &'a [String],
        coordinates: &'a CoordinateTable,
    ) -> Self {
        Router { graph, centers, coordinates }
    }

    pub fn nearest_center(&self, destination: &str, radius_km: f64) -> Option<NearestCenter<'a>> {
        nearest_center(destination, self.centers, self.coordinates, radius_km)
    }

    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<Path, RoutingError> {
        self.graph.shortest_path(origin, destination)
    }

    /// `Route: A -> B -> C`, or `No route between A and C` when the graph has no path.
    pub fn describe_route(&self, origin: &str, destination: &str) -> String {
        match self.shortest_path(origin, destination) {
            Ok(path) => format!("Route: {}", path.nodes.join(" -> ")),
            Err(_) => format!("No route between {} and {}", origin, destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Coordinate;

    fn fixture() -> (Vec<String>, CoordinateTable) {
        let coords: CoordinateTable = vec![
            ("A", Coordinate::new(0.0, 0.0)),
            ("B", Coordinate::new(10.0, 0.0)),
            ("C", Coordinate::new(1.0, 0.0)),
            ("Far", Coordinate::new(0.0, 30.0)),
        ]
        .into_iter()
        .collect();
        (vec!["A".to_string(), "B".to_string()], coords)
    }

    #[test]
    fn picks_closest_center() {
        let (centers, coords) = fixture();
        let nearest = nearest_center("C", &centers, &coords, f64::INFINITY).unwrap();
        assert_eq!(nearest.center, "A");
        let expected = haversine(coords.get("A").unwrap(), coords.get("C").unwrap());
        assert!((nearest.distance_km - expected).abs() < 1e-9);
    }

    #[test]
    fn radius_limit_excludes_far_centers() {
        let (centers, coords) = fixture();
        // Far is ~3336 km from A.
        assert!(nearest_center("Far", &centers, &coords, 2000.0).is_none());
        let unbounded = nearest_center("Far", &centers, &coords, f64::INFINITY).unwrap();
        assert_eq!(unbounded.center, "A");
    }

    #[test]
    fn radius_is_inclusive() {
        let (centers, coords) = fixture();
        let exact = haversine(coords.get("A").unwrap(), coords.get("C").unwrap());
        assert_eq!(nearest_center("C", &centers, &coords, exact).unwrap().center, "A");
    }

    #[test]
    fn empty_center_list_finds_nothing() {
        let (_, coords) = fixture();
        assert!(nearest_center("C", &[], &coords, f64::INFINITY).is_none());
    }

    #[test]
    fn center_is_its_own_nearest() {
        let (centers, coords) = fixture();
        let nearest = nearest_center("B", &centers, &coords, f64::INFINITY).unwrap();
        assert_eq!(nearest.center, "B");
        assert_eq!(nearest.distance_km, 0.0);
    }

    #[test]
    fn describes_routes_and_missing_routes() {
        let (centers, coords) = fixture();
        let graph = ProximityGraph::build(&centers, &coords, 2000.0);
        let router = Router::new(&graph, &centers, &coords);

        assert_eq!(router.describe_route("B", "C"), "Route: B -> A -> C");
        assert_eq!(router.describe_route("A", "A"), "Route: A");
        assert_eq!(router.describe_route("A", "Far"), "No route between A and Far");
        assert_eq!(router.describe_route("A", "Nowhere"), "No route between A and Nowhere");
    }
}
