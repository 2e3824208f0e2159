pub mod allocator;

pub use allocator::{AssignmentPolicy, FleetAllocator};
