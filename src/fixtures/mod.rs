pub mod brazil;
pub mod data_generator;

pub use data_generator::{cycled_volume, due_date, generate_deliveries};
