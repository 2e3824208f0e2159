pub mod init;
pub mod init_types;

pub use init::{load_scenario, parse_start, setup, Instance};
pub use init_types::Scenario;
