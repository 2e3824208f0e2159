use std::env;
use std::path::PathBuf;

use dotenv::dotenv;
use tracing::{debug, info};

use crate::allocation::AssignmentPolicy;
use crate::error::ConfigError;

pub mod constant {
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    pub const AVERAGE_SPEED_KMH: f64 = 60.0;
    pub const BUILD_RADIUS_KM: f64 = 2000.0;
    pub const UNBOUNDED_RADIUS_KM: f64 = f64::INFINITY;
    pub const DUE_DATE_OFFSET_DAYS: i64 = 2;
    pub const VOLUME_CYCLE: [u64; 3] = [600, 700, 800];
    pub const REPORT_CSV_PATH: &str = "allocations.csv";
}

const SCENARIO_VAR: &str = "LASTMILE_SCENARIO";
const BUILD_RADIUS_VAR: &str = "LASTMILE_BUILD_RADIUS_KM";
const ASSIGNMENT_VAR: &str = "LASTMILE_ASSIGNMENT";
const REPORT_CSV_VAR: &str = "LASTMILE_REPORT_CSV";

/// Runtime settings for a simulation run, resolved from `.env` and the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scenario_path: Option<PathBuf>,
    pub build_radius_km: f64,
    pub assignment_policy: AssignmentPolicy,
    pub report_csv: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            scenario_path: None,
            build_radius_km: constant::BUILD_RADIUS_KM,
            assignment_policy: AssignmentPolicy::Atomic,
            report_csv: Some(PathBuf::from(constant::REPORT_CSV_PATH)),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = lookup(SCENARIO_VAR).filter(|p| !p.trim().is_empty()) {
            info!("Using scenario file from {}: {}", SCENARIO_VAR, path);
            settings.scenario_path = Some(PathBuf::from(path.trim()));
        }

        if let Some(raw) = lookup(BUILD_RADIUS_VAR) {
            let radius: f64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: BUILD_RADIUS_VAR,
                value: raw.clone(),
            })?;
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConfigError::Invalid {
                    key: BUILD_RADIUS_VAR,
                    value: raw,
                });
            }
            settings.build_radius_km = radius;
        }

        if let Some(raw) = lookup(ASSIGNMENT_VAR) {
            settings.assignment_policy =
                raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: ASSIGNMENT_VAR,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup(REPORT_CSV_VAR) {
            let trimmed = raw.trim();
            settings.report_csv = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(PathBuf::from(trimmed))
            };
        }

        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}
