//! Undirected proximity graph over centers and destinations.
//!
//! Centers form a clique. Every other location is attached to its nearest
//! center when that center lies within the build radius, and is left as an
//! isolated node otherwise. Edge weights are great-circle kilometres.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use itertools::Itertools;
use tracing::{debug, info, trace, warn};

use crate::distance::haversine;
use crate::domain::types::CoordinateTable;
use crate::error::{RoutingError, RoutingResult};
use crate::network::router::nearest_center;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub weight_km: f64,
}

/// Ordered node sequence from source to target, inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<String>,
    pub total_km: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ProximityGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl ProximityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for `centers` (in reference order) and every location in `coordinates`.
    ///
    /// Nearest-center ties go to the center listed first.
    pub fn build(centers: &[String], coordinates: &CoordinateTable, radius_km: f64) -> Self {
        let mut graph = ProximityGraph::new();

        for center in centers {
            graph.add_node(center);
        }

        for (a, b) in centers.iter().tuple_combinations() {
            let (Some(ca), Some(cb)) = (coordinates.get(a), coordinates.get(b)) else {
                warn!("Skipping center pair {} - {}: missing coordinates", a, b);
                continue;
            };
            let dist = haversine(ca, cb);
            trace!("Center link {} - {}: {:.1} km", a, b, dist);
            graph.add_edge(a, b, dist);
        }

        for name in coordinates.names() {
            if graph.contains(name) {
                continue;
            }
            graph.add_node(name);
            match nearest_center(name, centers, coordinates, radius_km) {
                Some(nearest) => {
                    trace!("Attaching {} to {} ({:.1} km)", name, nearest.center, nearest.distance_km);
                    graph.add_edge(nearest.center, name, nearest.distance_km);
                }
                None => {
                    warn!("{} has no center within {:.0} km; left isolated", name, radius_km);
                }
            }
        }

        info!(
            "Proximity graph built: {} nodes, {} edges (radius {:.0} km)",
            graph.node_count(),
            graph.edge_count(),
            radius_km
        );
        graph
    }

    /// Insert `name` if missing and return its node index.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.adjacency.push(vec![]);
        idx
    }

    /// Add an undirected edge; re-adding an existing edge overwrites its weight.
    pub fn add_edge(&mut self, a: &str, b: &str, weight_km: f64) {
        let ia = self.add_node(a);
        let ib = self.add_node(b);

        if let Some(edge) = self.adjacency[ia].iter_mut().find(|e| e.to == ib) {
            edge.weight_km = weight_km;
            if let Some(back) = self.adjacency[ib].iter_mut().find(|e| e.to == ia) {
                back.weight_km = weight_km;
            }
            return;
        }

        self.adjacency[ia].push(Edge { to: ib, weight_km });
        if ia != ib {
            self.adjacency[ib].push(Edge { to: ia, weight_km });
        }
        self.edge_count += 1;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }

    pub fn neighbors(&self, name: &str) -> Vec<(&str, f64)> {
        match self.index.get(name) {
            Some(&idx) => self.adjacency[idx]
                .iter()
                .map(|e| (self.nodes[e.to].as_str(), e.weight_km))
                .collect(),
            None => vec![],
        }
    }

    pub fn degree(&self, name: &str) -> usize {
        self.index.get(name).map_or(0, |&idx| self.adjacency[idx].len())
    }

    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let ia = *self.index.get(a)?;
        let ib = *self.index.get(b)?;
        self.adjacency[ia].iter().find(|e| e.to == ib).map(|e| e.weight_km)
    }

    /// Dijkstra over edge weights. `source == target` yields `[source]` at zero cost.
    pub fn shortest_path(&self, source: &str, target: &str) -> RoutingResult<Path> {
        let from = *self
            .index
            .get(source)
            .ok_or_else(|| RoutingError::UnknownLocation(source.to_string()))?;
        let to = *self
            .index
            .get(target)
            .ok_or_else(|| RoutingError::UnknownLocation(target.to_string()))?;

        if from == to {
            return Ok(Path { nodes: vec![source.to_string()], total_km: 0.0 });
        }

        let n = self.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        dist[from] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Frontier { cost: 0.0, node: from }));

        while let Some(Reverse(Frontier { cost, node })) = heap.pop() {
            if node == to {
                let path = self.reconstruct(&prev, to, cost);
                debug!("Shortest path {} -> {}: {:?} ({:.1} km)", source, target, path.nodes, cost);
                return Ok(path);
            }

            // stale entry
            if cost > dist[node] {
                continue;
            }

            for edge in &self.adjacency[node] {
                let next = cost + edge.weight_km;
                if next < dist[edge.to] {
                    dist[edge.to] = next;
                    prev[edge.to] = Some(node);
                    heap.push(Reverse(Frontier { cost: next, node: edge.to }));
                }
            }
        }

        Err(RoutingError::NoPath { from: source.to_string(), to: target.to_string() })
    }

    fn reconstruct(&self, prev: &[Option<usize>], to: usize, total_km: f64) -> Path {
        let mut nodes = vec![self.nodes[to].clone()];
        let mut cur = to;
        while let Some(p) = prev[cur] {
            nodes.push(self.nodes[p].clone());
            cur = p;
        }
        nodes.reverse();
        Path { nodes, total_km }
    }
}

/// Heap entry ordered by cost, then node index so ties resolve deterministically.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    cost: f64,
    node: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
