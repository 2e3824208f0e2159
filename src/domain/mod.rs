pub mod fleet;
pub mod types;

pub use fleet::{build_fleet, CenterFleet};
pub use types::*;
