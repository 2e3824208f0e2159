pub mod graph;
pub mod router;

pub use graph::{Edge, Path, ProximityGraph};
pub use router::{nearest_center, NearestCenter, Router};
