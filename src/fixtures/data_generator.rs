use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::config::constant::{DUE_DATE_OFFSET_DAYS, VOLUME_CYCLE};
use crate::domain::types::Delivery;
use crate::error::{ScenarioError, ScenarioResult};
use crate::setup::init_types::DeliveryPlan;

/// Volume for the `index`-th destination of a plan: cycles 600, 700, 800.
pub fn cycled_volume(index: usize) -> u64 {
    VOLUME_CYCLE[index % VOLUME_CYCLE.len()]
}

/// Due date for the `index`-th destination of a plan.
pub fn due_date(start: NaiveDate, index: usize) -> NaiveDate {
    start + Duration::days(index as i64 + DUE_DATE_OFFSET_DAYS)
}

/// Expand delivery plans into deliveries, grouped by plan and in destination order.
pub fn generate_deliveries(plans: &[DeliveryPlan], start: NaiveDate) -> ScenarioResult<Vec<Delivery>> {
    let mut deliveries = vec![];

    for plan in plans {
        for (i, destination) in plan.destinations.iter().enumerate() {
            let volume = plan.volumes.get(i).copied().unwrap_or_else(|| cycled_volume(i));
            if volume == 0 {
                return Err(ScenarioError::InvalidVolume { destination: destination.clone() });
            }
            let delivery = Delivery {
                destination: destination.clone(),
                due_date: due_date(start, i),
                volume,
            };
            debug!("Generated {:?} for {}", delivery, plan.center);
            deliveries.push(delivery);
        }
    }

    let total_volume = deliveries.iter().fold(0u64, |acc, d| acc.saturating_add(d.volume));
    info!("Generated {} deliveries, total volume {}", deliveries.len(), total_volume);
    Ok(deliveries)
}
